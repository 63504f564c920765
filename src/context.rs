//! Application Context
//!
//! Shared state provided via Leptos Context API.

use gift_registry_lib::config::{ENV_AUTH_TOKEN, ENV_DATABASE_URL, ENV_DEBUG, ENV_SYNC};
use gift_registry_lib::{
    Controller, DomainError, DomainResult, RegistryConfig, RemoteStore, Screen,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

/// How long an alert stays up
const ALERT_MS: u32 = 5_000;

pub type AppController = Controller<RemoteStore>;

/// Connection settings baked in at build time.
pub fn build_config() -> DomainResult<RegistryConfig> {
    RegistryConfig::from_lookup(|key| {
        let value = match key {
            ENV_DATABASE_URL => option_env!("GIFT_REGISTRY_DATABASE_URL"),
            ENV_AUTH_TOKEN => option_env!("GIFT_REGISTRY_AUTH_TOKEN"),
            ENV_SYNC => option_env!("GIFT_REGISTRY_SYNC"),
            ENV_DEBUG => option_env!("GIFT_REGISTRY_DEBUG"),
            _ => None,
        };
        value.map(String::from)
    })
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    controller: StoredValue<AppController, LocalStorage>,
    config: StoredValue<RegistryConfig>,
    /// Screen being shown
    pub screen: RwSignal<Screen>,
    /// Message in the alert banner
    pub alert: ReadSignal<Option<String>>,
    set_alert: WriteSignal<Option<String>>,
    alert_seq: StoredValue<u32>,
}

impl AppContext {
    pub fn new(config: RegistryConfig, screen: Screen) -> DomainResult<Self> {
        let store = RemoteStore::new(&config)?;
        let controller = Controller::new(Arc::new(store), config.sync_strategy);
        let (alert, set_alert) = signal(None);
        Ok(Self {
            controller: StoredValue::new_local(controller),
            config: StoredValue::new(config),
            screen: RwSignal::new(screen),
            alert,
            set_alert,
            alert_seq: StoredValue::new(0),
        })
    }

    pub fn controller(&self) -> AppController {
        self.controller.get_value()
    }

    pub fn share_param(&self) -> String {
        self.config.with_value(|c| c.share_param.clone())
    }

    /// Show `message` in the banner; it clears itself after a few seconds
    /// unless a newer alert replaced it.
    pub fn alert(&self, message: impl Into<String>) {
        let seq = self.alert_seq.with_value(|s| s + 1);
        self.alert_seq.set_value(seq);
        self.set_alert.set(Some(message.into()));
        let set_alert = self.set_alert;
        let alert_seq = self.alert_seq;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(ALERT_MS).await;
            if alert_seq.try_get_value() == Some(seq) {
                set_alert.set(None);
            }
        });
    }

    pub fn dismiss_alert(&self) {
        self.set_alert.set(None);
    }

    /// Surface a failed operation to the user.
    pub fn report(&self, error: &DomainError) {
        let message = match error {
            DomainError::StorageUnavailable(_) => {
                "Could not reach the gift store. Please try again.".to_string()
            }
            other => other.to_string(),
        };
        self.alert(message);
    }

    pub fn navigate(&self, screen: Screen) {
        log::debug!("showing {:?}", screen);
        self.screen.set(screen);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
