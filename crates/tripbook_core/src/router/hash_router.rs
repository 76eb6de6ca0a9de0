//! Route state driven by a fragment host.

use super::host::{FragmentHost, ListenerId};
use super::route::{parse_fragment, Route};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Consumer-side router.
///
/// Route state changes only through the host's change notification:
/// [`HashRouter::navigate`] writes the fragment and the mounted listener
/// re-derives the route from it.
pub struct HashRouter<H: FragmentHost> {
    host: Rc<H>,
    route: Rc<RefCell<Route>>,
    listener: Option<ListenerId>,
}

impl<H: FragmentHost> HashRouter<H> {
    /// Creates an unmounted router holding the route of the current fragment.
    pub fn new(host: Rc<H>) -> Self {
        let route = parse_fragment(&host.fragment());
        Self {
            host,
            route: Rc::new(RefCell::new(route)),
            listener: None,
        }
    }

    /// Subscribes to fragment changes. Mounting twice keeps one listener.
    pub fn mount(&mut self) {
        if self.listener.is_some() {
            return;
        }

        *self.route.borrow_mut() = parse_fragment(&self.host.fragment());
        let route = Rc::clone(&self.route);
        let id = self.host.subscribe(Rc::new(move |fragment: &str| {
            let next = parse_fragment(fragment);
            debug!("event=route_change module=router status=ok route={next}");
            *route.borrow_mut() = next;
        }));
        self.listener = Some(id);
    }

    /// Deregisters the listener. Safe to call when not mounted.
    pub fn unmount(&mut self) {
        if let Some(id) = self.listener.take() {
            self.host.unsubscribe(id);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Route derived from the last observed fragment.
    pub fn route(&self) -> Route {
        self.route.borrow().clone()
    }

    /// Writes the fragment for `route` to the host.
    pub fn navigate(&self, route: &Route) {
        self.host.set_fragment(&route.to_fragment());
    }
}

impl<H: FragmentHost> Drop for HashRouter<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::HashRouter;
    use crate::router::host::{FragmentHost, MemoryFragmentHost};
    use crate::router::route::Route;
    use std::rc::Rc;

    #[test]
    fn initial_route_comes_from_current_fragment() {
        let host = Rc::new(MemoryFragmentHost::new("#/print/p1"));
        let router = HashRouter::new(Rc::clone(&host));
        assert_eq!(router.route(), Route::Print("p1".to_string()));
        assert!(!router.is_mounted());
    }

    #[test]
    fn navigate_updates_route_only_through_subscription() {
        let host = Rc::new(MemoryFragmentHost::new("/"));
        let mut router = HashRouter::new(Rc::clone(&host));

        router.navigate(&Route::Edit("t1".to_string()));
        assert_eq!(host.fragment(), "/trip/t1");
        assert_eq!(router.route(), Route::List);

        router.mount();
        assert_eq!(router.route(), Route::Edit("t1".to_string()));
        router.navigate(&Route::Print("t1".to_string()));
        assert_eq!(router.route(), Route::Print("t1".to_string()));
    }

    #[test]
    fn external_fragment_changes_are_observed() {
        let host = Rc::new(MemoryFragmentHost::new("/"));
        let mut router = HashRouter::new(Rc::clone(&host));
        router.mount();

        host.set_fragment("/bogus/path");
        assert_eq!(router.route(), Route::List);
        host.set_fragment("#/trip/zz");
        assert_eq!(router.route(), Route::Edit("zz".to_string()));
    }

    #[test]
    fn mount_is_single_listener_and_teardown_deregisters() {
        let host = Rc::new(MemoryFragmentHost::new("/"));
        {
            let mut router = HashRouter::new(Rc::clone(&host));
            router.mount();
            router.mount();
            assert_eq!(host.listener_count(), 1);

            router.unmount();
            assert_eq!(host.listener_count(), 0);
            router.mount();
            assert_eq!(host.listener_count(), 1);
        }
        assert_eq!(host.listener_count(), 0);
    }
}
