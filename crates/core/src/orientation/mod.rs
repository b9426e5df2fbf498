/// Front-back tilt, in degrees, beyond which the device counts as face down.
pub const FACE_DOWN_DEGREES: f64 = 135.0;

/// Outcome of probing the platform for device-orientation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationSupport {
    /// Events will be delivered.
    Supported,
    /// The platform gates orientation behind a permission prompt and the
    /// user declined it.
    Denied,
    /// The platform has no orientation source at all.
    Unsupported,
}

/// Permission prompt exposed by platforms that gate orientation events
/// (notably iOS Safari).
pub trait PermissionGate {
    fn request_permission(&mut self) -> bool;
}

/// Capability probe for orientation events.
///
/// Platforms that expose orientation without a gate deliver events
/// unconditionally; gated platforms are asked once up front.
pub fn probe_support(
    available: bool,
    gate: Option<&mut dyn PermissionGate>,
) -> OrientationSupport {
    if !available {
        return OrientationSupport::Unsupported;
    }

    match gate {
        Some(gate) => {
            if gate.request_permission() {
                OrientationSupport::Supported
            } else {
                OrientationSupport::Denied
            }
        }
        None => OrientationSupport::Supported,
    }
}

/// True when the reported beta angle means the device is lying face down.
pub fn is_face_down(beta_degrees: f64) -> bool {
    beta_degrees.abs() > FACE_DOWN_DEGREES
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGate(bool);

    impl PermissionGate for FixedGate {
        fn request_permission(&mut self) -> bool {
            self.0
        }
    }

    #[test]
    fn ungated_platforms_are_supported() {
        assert_eq!(probe_support(true, None), OrientationSupport::Supported);
    }

    #[test]
    fn missing_api_is_unsupported() {
        let mut gate = FixedGate(true);
        assert_eq!(
            probe_support(false, Some(&mut gate)),
            OrientationSupport::Unsupported
        );
    }

    #[test]
    fn gate_decides_between_supported_and_denied() {
        let mut granted = FixedGate(true);
        let mut refused = FixedGate(false);
        assert_eq!(
            probe_support(true, Some(&mut granted)),
            OrientationSupport::Supported
        );
        assert_eq!(
            probe_support(true, Some(&mut refused)),
            OrientationSupport::Denied
        );
    }

    #[test]
    fn face_down_needs_a_large_tilt_either_way() {
        assert!(is_face_down(150.0));
        assert!(is_face_down(-150.0));
        assert!(!is_face_down(135.0));
        assert!(!is_face_down(0.0));
        assert!(!is_face_down(-90.0));
    }
}
