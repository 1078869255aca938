//! Notification services.

mod fanout;

pub use fanout::{
    FanoutPlan, ImplicitWatch, ImplicitWatchRule, NotificationConfig, NotificationFanout,
    NotificationTemplates,
};
