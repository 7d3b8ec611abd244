use crate::alert::{Alert, AlertSink};

/// Wraps a sink and forwards only alerts matching a user-supplied predicate.
pub struct FilteredSink {
    predicate: Box<dyn Fn(&Alert) -> bool + Send + Sync>,
    inner: Box<dyn AlertSink>,
}

impl FilteredSink {
    pub fn new(
        predicate: impl Fn(&Alert) -> bool + Send + Sync + 'static,
        inner: impl AlertSink + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }

    /// Forward only alerts about `device`.
    pub fn for_device(device: impl Into<String>, inner: impl AlertSink + 'static) -> Self {
        let device = device.into();
        Self::new(move |alert| alert.device == device, inner)
    }
}

impl AlertSink for FilteredSink {
    fn request_authorization(&mut self) -> bool {
        self.inner.request_authorization()
    }

    fn deliver(&mut self, alert: &Alert) {
        if (self.predicate)(alert) {
            self.inner.deliver(alert);
        }
    }
}
