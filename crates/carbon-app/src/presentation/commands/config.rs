use crate::application::dtos::ConfigDto;
use crate::application::services::{ConfigService, LogLevel};
use crate::presentation::error::CommandError;
use crate::presentation::output::Message;
use carbon_infrastructure::config::{parse_api_base_url, TrackerConfig};

pub fn config_show(config: &TrackerConfig, service: &ConfigService) -> ConfigDto {
    ConfigDto {
        log_level: service.get_log_level().as_str().to_string(),
        api_base_url: config.api_base_url.as_ref().map(|url| url.to_string()),
        data_dir: config.data_dir.display().to_string(),
        log_dir: config.log_dir.display().to_string(),
        storage_slot: config.storage_slot.clone(),
        offline: config.is_offline(),
    }
}

pub fn set_log_level(service: &ConfigService, level: LogLevel) -> Result<Message, CommandError> {
    service.set_log_level(level)?;
    Ok(Message::new(format!(
        "Log level set to {} (takes effect on the next run)",
        level.as_str()
    )))
}

pub fn set_api_url(service: &ConfigService, url: Option<&str>) -> Result<Message, CommandError> {
    if let Some(url) = url {
        parse_api_base_url(url)?;
    }
    service.set_api_base_url(url)?;
    Ok(Message::new(match service.get_api_base_url() {
        Some(url) => format!("API base URL set to {}", url),
        None => "API base URL cleared".to_string(),
    }))
}
