use std::future::Future;

use leptos::prelude::*;

/// Something that shows an operation is running
pub trait BusyFlag {
    fn set_busy(&self, busy: bool);
}

impl BusyFlag for RwSignal<bool> {
    fn set_busy(&self, busy: bool) {
        self.set(busy);
    }
}

impl<T: BusyFlag + ?Sized> BusyFlag for &T {
    fn set_busy(&self, busy: bool) {
        (**self).set_busy(busy);
    }
}

/// Raises the flag on creation and lowers it when dropped, including on an
/// early return or an unwinding panic.
pub struct BusyGuard<F: BusyFlag> {
    flag: F,
}

impl<F: BusyFlag> BusyGuard<F> {
    pub fn new(flag: F) -> Self {
        flag.set_busy(true);
        Self { flag }
    }
}

impl<F: BusyFlag> Drop for BusyGuard<F> {
    fn drop(&mut self) {
        self.flag.set_busy(false);
    }
}

/// Runs an export download while `flag` is raised. Failures are logged and returned.
pub async fn start_export<F, Fut>(flag: F, download: Fut) -> Result<(), String>
where
    F: BusyFlag,
    Fut: Future<Output = Result<(), String>>,
{
    let _busy = BusyGuard::new(flag);
    download.await.map_err(|e| {
        log::error!("Export failed: {}", e);
        e
    })
}
