use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::RwLock;

use crate::models::Item;
use crate::Error;

/// The outcome of a payload hook.
pub enum Decision {
    /// Continue with the (possibly modified) payload.
    Proceed(Item),
    /// Discard the payload; it is never transmitted.
    Drop,
}

/// A hook which is invoked once per outgoing payload, synchronously, on the
/// thread performing the report call and immediately before the payload is
/// queued for transmission.
///
/// Hooks may rewrite any part of the payload, including attaching arbitrary
/// top-level keys through `data.extra`, or veto transmission entirely by
/// returning [`Decision::Drop`].
///
/// Closures with the signature `Fn(Item) -> Result<Decision, Error>` are
/// hooks too.
pub trait PayloadHook: Send + Sync {
    fn process(&self, item: Item) -> Result<Decision, Error>;
}

impl<F> PayloadHook for F
where
    F: Fn(Item) -> Result<Decision, Error> + Send + Sync,
{
    fn process(&self, item: Item) -> Result<Decision, Error> {
        self(item)
    }
}

lazy_static::lazy_static! {
    static ref HOOKS: RwLock<Vec<Box<dyn PayloadHook>>> = RwLock::new(Vec::new());
}

/// Registers a payload hook with the process-wide client. Hooks run in
/// registration order.
pub fn add_payload_hook<H>(hook: H)
where
    H: PayloadHook + 'static,
{
    HOOKS.write().unwrap().push(Box::new(hook));
}

pub(crate) fn process(item: Item) -> Option<Item> {
    run_hooks(&HOOKS.read().unwrap(), item)
}

/// Folds the payload through `hooks` in order.
///
/// A hook which fails or panics never costs us the report: the failure is
/// logged and the payload continues down the chain as it was before that
/// hook ran.
pub(crate) fn run_hooks(hooks: &[Box<dyn PayloadHook>], mut item: Item) -> Option<Item> {
    for hook in hooks {
        let candidate = item.clone();
        match catch_unwind(AssertUnwindSafe(|| hook.process(candidate))) {
            Ok(Ok(Decision::Proceed(next))) => item = next,
            Ok(Ok(Decision::Drop)) => return None,
            Ok(Err(err)) => error!("A payload hook failed, sending the payload unmodified: {}", err),
            Err(_) => error!("A payload hook panicked, sending the payload unmodified."),
        }
    }

    Some(item)
}
