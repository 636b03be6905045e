//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(first) => Err(ConfigError::InvalidValue {
                field: first.path,
                message: first.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_scraper(config, &mut result);
        Self::validate_places(config, &mut result);
        Self::validate_area(config, &mut result);
        Self::validate_routing(config, &mut result);

        result
    }

    fn validate_scraper(config: &Config, result: &mut ValidationResult) {
        let scraper = &config.scraper;

        if scraper.name_selector.trim().is_empty() {
            result.add_error(ValidationError::new(
                "scraper.name_selector",
                "Name selector cannot be empty",
            ));
        }

        if !(scraper.scroll_fraction > 0.0 && scraper.scroll_fraction <= 1.0) {
            result.add_error(ValidationError::new(
                "scraper.scroll_fraction",
                "scroll_fraction must be in (0, 1]",
            ));
        }

        if scraper.stable_cycles == 0 {
            result.add_error(ValidationError::new(
                "scraper.stable_cycles",
                "stable_cycles must be greater than 0",
            ));
        }

        if scraper.resolved_listing_url().is_none() {
            result.add_warning(ValidationWarning::new(
                "scraper.listing_url",
                "Listing URL is not set; pass --url or set DELIVEROO_BASE_URL to scrape",
            ));
        }
    }

    fn validate_places(config: &Config, result: &mut ValidationResult) {
        if config.places.resolved_api_key().is_none() {
            result.add_warning(ValidationWarning::new(
                "places.api_key",
                "API key is not set, may need to be set via environment variable",
            ));
        }

        Self::validate_url("places.base_url", &config.places.base_url, result);

        if config.places.bias_radius_m <= 0.0 {
            result.add_error(ValidationError::new(
                "places.bias_radius_m",
                "bias_radius_m must be positive",
            ));
        }
    }

    fn validate_area(config: &Config, result: &mut ValidationResult) {
        if config.area.max_distance_km < 0.0 {
            result.add_error(ValidationError::new(
                "area.max_distance_km",
                "max_distance_km cannot be negative",
            ));
        }
    }

    fn validate_routing(config: &Config, result: &mut ValidationResult) {
        let routing = &config.routing;

        if routing.tile_size == 0 {
            result.add_error(ValidationError::new(
                "routing.tile_size",
                "tile_size must be greater than 0",
            ));
        }

        Self::validate_url("routing.base_url", &routing.base_url, result);

        if routing.profile.trim().is_empty() {
            result.add_error(ValidationError::new(
                "routing.profile",
                "Routing profile cannot be empty",
            ));
        }

        if routing.resolved_api_key().is_none() {
            result.add_warning(ValidationWarning::new(
                "routing.api_key",
                "No routing API key; requests will be sent without Authorization",
            ));
        }
    }

    fn validate_url(path: &str, url: &str, result: &mut ValidationResult) {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            result.add_error(ValidationError::new(
                path,
                "URL must start with http:// or https://",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
