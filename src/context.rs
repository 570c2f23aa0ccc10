//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use crate::api::{ApiClient, FetchTransport, Transport};
use crate::auth::{resolve_route, AuthController, Route};
use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::profile::ProfileController;
use crate::session::{Session, SessionStore};
use crate::status::StatusMessage;
use crate::todos::TodoListController;

/// Controllers and their collaborators, built once at startup.
/// Holds `Rc`s, so it lives in a local `StoredValue`.
#[derive(Clone)]
pub struct Services {
    pub config: AppConfig,
    pub clock: Rc<dyn Clock>,
    pub session: SessionStore,
    pub api: ApiClient,
    pub auth: AuthController,
    pub todos: TodoListController,
    pub profile: ProfileController,
}

impl Services {
    pub fn new(
        config: AppConfig,
        session: SessionStore,
        transport: Rc<dyn Transport>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let api = ApiClient::new(&config.api_base_url, transport, session.clone());
        Self {
            auth: AuthController::new(api.clone(), session.clone()),
            todos: TodoListController::new(api.clone(), session.clone(), clock.clone()),
            profile: ProfileController::new(api.clone(), session.clone()),
            config,
            clock,
            session,
            api,
        }
    }

    /// Browser wiring: localStorage session, fetch transport, wall clock
    pub fn browser(config: AppConfig) -> Self {
        Self::new(
            config,
            SessionStore::browser(),
            Rc::new(FetchTransport),
            Rc::new(SystemClock),
        )
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    services: StoredValue<Services, LocalStorage>,
    /// Mirror of the session store, updated by its subscription
    pub session: ReadSignal<Session>,
    /// Page the user asked for - write
    set_requested: WriteSignal<Route>,
    /// Page actually shown, after the guard
    pub route: Memo<Route>,
    /// Current banner - read
    pub status: ReadSignal<Option<StatusMessage>>,
    /// Current banner - write
    set_status: WriteSignal<Option<StatusMessage>>,
}

impl AppContext {
    pub fn new(services: Services) -> Self {
        let (session, set_session) = signal(services.session.session());
        services.session.subscribe(move |s| {
            let _ = set_session.try_set(s.clone());
        });

        let (requested, set_requested) = signal(Route::Todos);
        let route = Memo::new(move |_| resolve_route(requested.get(), &session.get()));
        let (status, set_status) = signal(None::<StatusMessage>);

        Self {
            services: StoredValue::new_local(services),
            session,
            set_requested,
            route,
            status,
            set_status,
        }
    }

    /// Cloned handle to the controllers
    pub fn services(&self) -> Services {
        self.services.get_value()
    }

    pub fn config(&self) -> AppConfig {
        self.services.with_value(|s| s.config.clone())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.services.with_value(|s| s.clock.now())
    }

    /// Ask for a page; the guard may substitute another
    pub fn navigate(&self, route: Route) {
        self.set_requested.set(route);
    }

    pub fn notify_success(&self, text: &str) {
        let ttl = self.services.with_value(|s| s.config.status_ttl);
        self.set_status.set(Some(StatusMessage::success(text, self.now(), ttl)));
    }

    pub fn notify_error(&self, err: &AppError) {
        let ttl = self.services.with_value(|s| s.config.status_ttl);
        self.set_status.set(Some(StatusMessage::error(err, self.now(), ttl)));
    }

    /// Saved, but the list on screen is the one from before the change
    pub fn notify_stale_list(&self, success: Option<&str>, reload_error: &AppError) {
        let ttl = self.services.with_value(|s| s.config.status_ttl);
        self.set_status.set(Some(StatusMessage::stale_list(success, reload_error, self.now(), ttl)));
    }

    pub fn clear_status(&self) {
        self.set_status.set(None);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
