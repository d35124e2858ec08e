use crate::api::constants::{ADMIN_SEGMENT, API_PREFIX, TRACK_ENDPOINT};

/// How the tracking chain treats a given request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteScope {
    /// Admin area or unrelated API route: no tracking at all
    Bypass,
    /// The tracking endpoint itself: tracking is the whole handler
    Dedicated,
    /// Any other route: track opportunistically, never block
    Passive,
}

impl RouteScope {
    pub fn of(path: &str) -> Self {
        // 管理区优先判断，包含 "admin" 的路径一律跳过
        if path.contains(ADMIN_SEGMENT) {
            Self::Bypass
        } else if path == TRACK_ENDPOINT {
            Self::Dedicated
        } else if path == API_PREFIX || path.starts_with("/api/") {
            Self::Bypass
        } else {
            Self::Passive
        }
    }

    pub fn is_passive(&self) -> bool {
        matches!(self, Self::Passive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_routes_bypass() {
        assert_eq!(RouteScope::of("/api/admin/visitors"), RouteScope::Bypass);
        assert_eq!(RouteScope::of("/admin"), RouteScope::Bypass);
        assert_eq!(RouteScope::of("/dashboard/admin-panel"), RouteScope::Bypass);
    }

    #[test]
    fn test_track_endpoint_is_dedicated() {
        assert_eq!(RouteScope::of("/api/track"), RouteScope::Dedicated);
        assert_eq!(RouteScope::of("/api/track/extra"), RouteScope::Bypass);
    }

    #[test]
    fn test_other_api_routes_bypass() {
        assert_eq!(RouteScope::of("/api/contact"), RouteScope::Bypass);
        assert_eq!(RouteScope::of("/api"), RouteScope::Bypass);
    }

    #[test]
    fn test_everything_else_is_passive() {
        assert!(RouteScope::of("/").is_passive());
        assert!(RouteScope::of("/projects").is_passive());
        assert!(RouteScope::of("/apiary").is_passive());
    }
}
