use super::*;
use std::{panic::Location, rc::Rc};

/// Tag leading every record produced by [`Apex::auto_log_watch`].
pub const WATCH_TAG: &str = "[WATCH]";

pub type WatchCallback<A, R> = Box<dyn FnMut(A) -> R + 'static>;

/// Registration function of a reactive source, shaped
/// `watch(primary, callback, options) -> handle`.
///
/// Any `FnOnce` with that shape implements it, so a framework's own watch
/// function can be passed straight to [`Apex::auto_log_watch`].
pub trait Subscribe<A, R, O> {
    type Handle;

    fn subscribe(
        self,
        primary: WatchCallback<A, R>,
        callback: WatchCallback<A, R>,
        options: O,
    ) -> Self::Handle;
}

impl<F, A, R, O, H> Subscribe<A, R, O> for F
where
    F: FnOnce(WatchCallback<A, R>, WatchCallback<A, R>, O) -> H,
{
    type Handle = H;

    fn subscribe(
        self,
        primary: WatchCallback<A, R>,
        callback: WatchCallback<A, R>,
        options: O,
    ) -> H {
        self(primary, callback, options)
    }
}

impl Apex {
    /// Registers `callback` through `watch_fn` so that each invocation is
    /// preceded by an info record tagged [`WATCH_TAG`] carrying the
    /// invocation arguments.
    ///
    /// `watch_fn` receives the plain `callback` as the primary argument and
    /// the instrumented wrapper as the callback; both drive the same
    /// closure, which may be re-entered through either of them. Its handle
    /// is returned as-is. Records are attributed to the `auto_log_watch`
    /// call site.
    #[track_caller]
    pub fn auto_log_watch<W, C, A, R, O>(&self, watch_fn: W, callback: C, options: O) -> W::Handle
    where
        W: Subscribe<A, R, O>,
        C: Fn(A) -> R + 'static,
        A: ToArgs + 'static,
        R: 'static,
    {
        let location = Location::caller();
        let apex = self.clone();
        let callback = Rc::new(callback);

        let primary: WatchCallback<A, R> = {
            let callback = callback.clone();
            Box::new(move |args: A| callback(args))
        };

        let wrapped: WatchCallback<A, R> = Box::new(move |args: A| {
            let mut payload = vec![Arg::from(WATCH_TAG)];
            payload.extend(args.to_args());
            apex.emit(Level::Info, None, location, payload);

            callback(args)
        });

        watch_fn.subscribe(primary, wrapped, options)
    }
}
