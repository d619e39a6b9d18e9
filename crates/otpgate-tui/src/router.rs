//! Navigation router for screen transitions.

use otpgate_core::flow::Route;

/// Maximum history depth kept for `back`.
const MAX_DEPTH: usize = 20;

/// Router manages navigation history.
#[derive(Debug, Clone)]
pub struct Router {
    /// Navigation history stack; never empty.
    history: Vec<Route>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            history: vec![initial],
        }
    }

    /// Pushes `route` unless it is already current.
    ///
    /// Returns whether the route changed. Re-navigating to the current route
    /// does not re-enter it.
    pub fn push(&mut self, route: Route) -> bool {
        if *self.current() == route {
            return false;
        }
        if self.history.len() >= MAX_DEPTH {
            self.history.remove(0);
        }
        self.history.push(route);
        true
    }

    /// Goes back to the previous route.
    pub fn back(&mut self) -> Option<&Route> {
        if !self.can_go_back() {
            return None;
        }
        self.history.pop();
        self.history.last()
    }

    pub fn current(&self) -> &Route {
        // history is never empty: created with one entry and `back` keeps the last.
        &self.history[self.history.len() - 1]
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// Title for the current route.
    pub fn title(&self) -> &'static str {
        match self.current() {
            Route::Credentials => "Sign in",
            Route::Otp => "Verify code",
            Route::Other(_) => "Signed in",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_same_route_is_noop() {
        let mut router = Router::new(Route::Otp);
        assert!(!router.push(Route::Otp));
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_push_and_back() {
        let mut router = Router::new(Route::Credentials);
        assert!(router.push(Route::Otp));
        assert_eq!(router.current(), &Route::Otp);
        assert_eq!(router.title(), "Verify code");

        assert_eq!(router.back(), Some(&Route::Credentials));
        assert_eq!(router.back(), None);
        assert_eq!(router.current(), &Route::Credentials);
    }

    #[test]
    fn test_history_depth_is_bounded() {
        let mut router = Router::new(Route::Credentials);
        for i in 0..50 {
            router.push(Route::Other(format!("/r{i}")));
        }
        let mut depth = 1;
        while router.back().is_some() {
            depth += 1;
        }
        assert_eq!(depth, MAX_DEPTH);
    }
}
