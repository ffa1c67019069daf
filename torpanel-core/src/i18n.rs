//! Operator-visible fixed strings.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

/// One locale's worth of fixed text. Operation prefixes end with ": " so the
/// underlying error can be appended directly.
#[derive(Debug, Clone, Copy)]
pub struct Strings {
    pub error_prefix: &'static str,
    pub status_failed: &'static str,
    pub logs_failed: &'static str,
    pub start_failed: &'static str,
    pub stop_failed: &'static str,
    pub restart_failed: &'static str,
    pub newnym_failed: &'static str,
    pub bridge_failed: &'static str,
    pub bridge_required: &'static str,
    pub bridges_enabled: &'static str,
    pub bridges_disabled: &'static str,
    pub no_logs: &'static str,
    pub username_prompt: &'static str,
    pub password_prompt: &'static str,
}

pub static EN: Strings = Strings {
    error_prefix: "Error: ",
    status_failed: "Failed to load status: ",
    logs_failed: "Failed to load logs: ",
    start_failed: "Failed to start services: ",
    stop_failed: "Failed to stop services: ",
    restart_failed: "Failed to restart services: ",
    newnym_failed: "Failed to send NEWNYM: ",
    bridge_failed: "Failed to add bridge: ",
    bridge_required: "Enter a bridge configuration line",
    bridges_enabled: "Enabled",
    bridges_disabled: "Disabled",
    no_logs: "No logs",
    username_prompt: "Enter username:",
    password_prompt: "Enter password:",
};

pub static RU: Strings = Strings {
    error_prefix: "Ошибка: ",
    status_failed: "Ошибка загрузки статуса: ",
    logs_failed: "Ошибка загрузки логов: ",
    start_failed: "Ошибка запуска сервисов: ",
    stop_failed: "Ошибка остановки сервисов: ",
    restart_failed: "Ошибка перезапуска сервисов: ",
    newnym_failed: "Ошибка отправки NEWNYM: ",
    bridge_failed: "Ошибка добавления моста: ",
    bridge_required: "Введите конфигурацию моста",
    bridges_enabled: "Включены",
    bridges_disabled: "Отключены",
    no_logs: "Нет логов",
    username_prompt: "Введите имя пользователя:",
    password_prompt: "Введите пароль:",
};

impl Strings {
    pub fn for_locale(locale: Locale) -> &'static Strings {
        match locale {
            Locale::En => &EN,
            Locale::Ru => &RU,
        }
    }
}

