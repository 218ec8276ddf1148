//! Dashboard handlers and their Flux wiring.
//!
//! Each request path gets one `handle_*` function. `register_handlers`
//! binds them to a [`Flux`] instance, downcasting the typed payload and
//! passing the shared [`ScrapBff`] context.

pub mod barcode_handlers;
pub mod dashboard_handlers;
pub mod helpers;
pub mod line_handlers;
pub mod result_handlers;
pub mod scrap_handlers;

use std::any::Any;
use std::future::Future;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use openerp_flux::{Flux, I18nStore, Payload, StateStore};
use tracing::warn;

use crate::request::*;
use crate::service::ScrapService;
use crate::sound::SoundPlayer;

/// Delay before the barcode field is refocused after a new session.
pub const DEFAULT_REFOCUS_DELAY: Duration = Duration::from_millis(100);

/// What every handler can reach besides the store.
pub struct ScrapBff {
    pub service: Arc<dyn ScrapService>,
    pub sound: Arc<dyn SoundPlayer>,
    pub i18n: Arc<I18nStore>,
    pub refocus_delay: Duration,
    /// A barcode is being resolved.
    pub(crate) scan_in_flight: AtomicBool,
    /// Scrap orders are being created.
    pub(crate) confirm_in_flight: AtomicBool,
    /// Set by `dashboard/close`; key presses are ignored afterwards.
    pub(crate) closed: AtomicBool,
}

impl ScrapBff {
    pub fn new(
        service: Arc<dyn ScrapService>,
        sound: Arc<dyn SoundPlayer>,
        i18n: Arc<I18nStore>,
    ) -> Self {
        Self {
            service,
            sound,
            i18n,
            refocus_delay: DEFAULT_REFOCUS_DELAY,
            scan_in_flight: AtomicBool::new(false),
            confirm_in_flight: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    pub fn with_refocus_delay(mut self, delay: Duration) -> Self {
        self.refocus_delay = delay;
        self
    }

    /// Translate in the active locale.
    pub fn t(&self, key: &str) -> String {
        self.i18n.get(key)
    }
}

/// Bind `handler` to `path`, handing it the payload as `R`.
fn route<R, F, Fut>(flux: &Flux, bff: &Arc<ScrapBff>, path: &'static str, handler: F)
where
    R: Any + Clone + Send + Sync,
    F: Fn(Arc<ScrapBff>, R, Arc<StateStore>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let bff = Arc::clone(bff);
    flux.on(path, move |_, payload: Payload, store: Arc<StateStore>| {
        let call = payload
            .downcast_ref::<R>()
            .cloned()
            .map(|req| handler(Arc::clone(&bff), req, store));
        async move {
            match call {
                Some(fut) => fut.await,
                None => warn!(path, "unexpected payload type"),
            }
        }
    });
}

/// Register every dashboard handler.
pub fn register_handlers(flux: &Flux, bff: Arc<ScrapBff>) {
    // dashboard
    route(flux, &bff, InitializeReq::PATH, |bff, _: InitializeReq, store| async move {
        dashboard_handlers::handle_initialize(&bff, &store).await;
    });
    route(flux, &bff, CloseReq::PATH, |bff, _: CloseReq, store| async move {
        dashboard_handlers::handle_close(&bff, &store).await;
    });
    route(flux, &bff, KeyDownReq::PATH, |bff, req: KeyDownReq, store| async move {
        dashboard_handlers::handle_key_down(&req, &bff, &store).await;
    });
    route(flux, &bff, DismissNoticeReq::PATH, |_, req: DismissNoticeReq, store| async move {
        dashboard_handlers::handle_dismiss_notice(&req, &store).await;
    });

    // barcode
    route(flux, &bff, BarcodeInputReq::PATH, |_, req: BarcodeInputReq, store| async move {
        barcode_handlers::handle_input(&req, &store).await;
    });
    route(flux, &bff, SubmitBarcodeReq::PATH, |bff, _: SubmitBarcodeReq, store| async move {
        barcode_handlers::handle_submit(&bff, &store).await;
    });

    // lines
    route(flux, &bff, SetQuantityReq::PATH, |_, req: SetQuantityReq, store| async move {
        line_handlers::handle_set_quantity(&req, &store).await;
    });
    route(flux, &bff, IncrementLineReq::PATH, |_, req: IncrementLineReq, store| async move {
        line_handlers::handle_increment(&req, &store).await;
    });
    route(flux, &bff, DecrementLineReq::PATH, |_, req: DecrementLineReq, store| async move {
        line_handlers::handle_decrement(&req, &store).await;
    });
    route(flux, &bff, ScrapAllLineReq::PATH, |_, req: ScrapAllLineReq, store| async move {
        line_handlers::handle_scrap_all(&req, &store).await;
    });
    route(flux, &bff, RemoveLineReq::PATH, |_, req: RemoveLineReq, store| async move {
        line_handlers::handle_remove(&req, &store).await;
    });
    route(flux, &bff, SelectReasonReq::PATH, |_, req: SelectReasonReq, store| async move {
        line_handlers::handle_select_reason(&req, &store).await;
    });

    // submission
    route(flux, &bff, RequestScrapReq::PATH, |bff, _: RequestScrapReq, store| async move {
        scrap_handlers::handle_request(&bff, &store).await;
    });
    route(flux, &bff, CancelScrapReq::PATH, |bff, _: CancelScrapReq, store| async move {
        scrap_handlers::handle_cancel(&bff, &store).await;
    });
    route(flux, &bff, ConfirmScrapReq::PATH, |bff, _: ConfirmScrapReq, store| async move {
        scrap_handlers::handle_confirm(&bff, &store).await;
    });

    // result
    route(flux, &bff, OpenScrapReq::PATH, |_, req: OpenScrapReq, store| async move {
        result_handlers::handle_open_scrap(&req, &store).await;
    });
    route(flux, &bff, OpenProductReq::PATH, |_, req: OpenProductReq, store| async move {
        result_handlers::handle_open_product(&req, &store).await;
    });
    route(flux, &bff, AdjustInventoryReq::PATH, |bff, req: AdjustInventoryReq, store| async move {
        result_handlers::handle_adjust_inventory(&req, &bff, &store).await;
    });
    route(flux, &bff, NewSessionReq::PATH, |bff, _: NewSessionReq, store| async move {
        result_handlers::handle_new_session(bff, store).await;
    });
}
