//! Convenience macros for GUI-RPC tracing.
//!
//! These wrap the standard tracing macros with the target of the emitting
//! subsystem. Each macro accepts an optional leading level keyword
//! (`warn`, `info`, `debug`, `trace`); without one the subsystem's default
//! level is used.

/// Emit a transport (socket and framing) trace.
///
/// # Example
/// ```ignore
/// trace_transport!("sent {} bytes", len);
/// trace_transport!(warn, "read timed out after {:?}", timeout);
/// ```
#[macro_export]
macro_rules! trace_transport {
    (warn, $($arg:tt)*) => {
        $crate::tracing::warn!(target: "guirpc::transport", $($arg)*)
    };
    (info, $($arg:tt)*) => {
        $crate::tracing::info!(target: "guirpc::transport", $($arg)*)
    };
    ($($arg:tt)*) => {
        $crate::tracing::trace!(target: "guirpc::transport", $($arg)*)
    };
}

/// Emit a reply decoding trace.
///
/// # Example
/// ```ignore
/// trace_decode!(warn, "bad integer {:?} in <{}>", text, tag);
/// ```
#[macro_export]
macro_rules! trace_decode {
    (warn, $($arg:tt)*) => {
        $crate::tracing::warn!(target: "guirpc::decode", $($arg)*)
    };
    (info, $($arg:tt)*) => {
        $crate::tracing::info!(target: "guirpc::decode", $($arg)*)
    };
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "guirpc::decode", $($arg)*)
    };
}

/// Emit an authentication trace.
///
/// # Example
/// ```ignore
/// trace_auth!("received nonce");
/// ```
#[macro_export]
macro_rules! trace_auth {
    (warn, $($arg:tt)*) => {
        $crate::tracing::warn!(target: "guirpc::auth", $($arg)*)
    };
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "guirpc::auth", $($arg)*)
    };
}

/// Emit an RPC facade trace.
///
/// # Example
/// ```ignore
/// trace_rpc!("get_state returned {} projects", count);
/// ```
#[macro_export]
macro_rules! trace_rpc {
    (warn, $($arg:tt)*) => {
        $crate::tracing::warn!(target: "guirpc::rpc", $($arg)*)
    };
    (info, $($arg:tt)*) => {
        $crate::tracing::info!(target: "guirpc::rpc", $($arg)*)
    };
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "guirpc::rpc", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::Subscriber;
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<(String, String)>>>);

    struct MessageVisitor<'a>(&'a mut String);

    impl Visit for MessageVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                *self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for Captured {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut message = String::new();
            event.record(&mut MessageVisitor(&mut message));
            self.0
                .lock()
                .expect("capture lock")
                .push((event.metadata().target().to_owned(), message));
        }
    }

    fn capture(f: impl FnOnce()) -> Vec<(String, String)> {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry().with(captured.clone());
        tracing::subscriber::with_default(subscriber, f);
        let events = captured.0.lock().expect("capture lock").clone();
        events
    }

    #[test]
    fn macros_tag_events_with_subsystem_targets() {
        let events = capture(|| {
            trace_transport!("sent {} bytes", 12);
            trace_decode!(warn, "bad value");
            trace_auth!("nonce received");
            trace_rpc!(info, "connected");
        });

        let targets: Vec<&str> = events.iter().map(|(target, _)| target.as_str()).collect();
        assert_eq!(
            targets,
            [
                "guirpc::transport",
                "guirpc::decode",
                "guirpc::auth",
                "guirpc::rpc"
            ]
        );
        assert_eq!(events[0].1, "sent 12 bytes");
    }
}
