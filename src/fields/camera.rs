//! Camera platform/revision pairing.

use crate::software::SoftwareCameraInfo;

/// Camera info exists only when both halves are present; either one alone is `None`.
#[inline]
pub fn camera_info(platform: Option<&str>, revision: Option<&str>) -> Option<SoftwareCameraInfo> {
    Some(SoftwareCameraInfo {
        platform: platform?.to_string(),
        revision: revision?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_both_halves() {
        assert!(camera_info(Some("a720"), None).is_none());
        assert!(camera_info(None, Some("100c")).is_none());
        let cam = camera_info(Some("a720"), Some("100c")).unwrap();
        assert_eq!(cam.platform, "a720");
        assert_eq!(cam.revision, "100c");
    }
}
