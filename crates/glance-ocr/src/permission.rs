use std::sync::atomic::{AtomicBool, Ordering};

/// Camera access flag.
///
/// The grant itself is asked for by the front-end; this only remembers the answer.
#[derive(Debug, Default)]
pub struct CameraPermission {
    granted: AtomicBool,
}

impl CameraPermission {
    pub fn new(granted: bool) -> Self {
        Self {
            granted: AtomicBool::new(granted),
        }
    }

    pub fn is_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    pub fn grant(&self) {
        tracing::info!("Camera permission granted");
        self.granted.store(true, Ordering::SeqCst);
    }

    pub fn deny(&self) {
        tracing::info!("Camera permission denied");
        self.granted.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remembers_answer() {
        let permission = CameraPermission::new(false);
        assert!(!permission.is_granted());
        permission.grant();
        assert!(permission.is_granted());
        permission.deny();
        assert!(!permission.is_granted());
    }
}
