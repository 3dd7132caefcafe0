//! Reports panics as fatal log entries before unwinding continues

use crate::dispatch::{log_entry, shutdown_dispatch};
use crate::entry::{CALLER_SKIP, LogEntry};
use crate::levels::Level;
use std::io::Write;
use std::panic::{PanicHookInfo, take_hook};
use std::sync::Mutex;

pub fn init_panic_hook() {
    type BoxedHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;
    static PREVIOUS_HOOK: Mutex<Option<BoxedHook>> = Mutex::new(None);

    {
        let mut previous_hook_lock = PREVIOUS_HOOK.lock().unwrap();
        assert!(previous_hook_lock.is_none());
        *previous_hook_lock = Some(take_hook());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        let entry = LogEntry::new(
            Level::Fatal,
            format!("panic: {panic_info:?}"),
            Vec::new(),
            CALLER_SKIP,
        );
        log_entry(&entry);
        shutdown_dispatch();
        if let Ok(guard) = PREVIOUS_HOOK.lock()
            && let Some(hook) = guard.as_ref()
        {
            let _ = std::io::stdout().flush();
            hook(panic_info);
        }
    }));
}
