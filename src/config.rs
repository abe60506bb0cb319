use crate::models::FormatSource;
use std::sync::OnceLock;

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    parse_env(name).unwrap_or(default)
}

static FORMAT_SOURCE: OnceLock<FormatSource> = OnceLock::new();

/// `QR_INSPECT_FORMAT_SOURCE`: `sampled` (default) or `decoder`
pub(crate) fn format_source() -> FormatSource {
    *FORMAT_SOURCE.get_or_init(|| {
        let value = std::env::var("QR_INSPECT_FORMAT_SOURCE").ok();
        match value.as_deref().map(str::parse::<FormatSource>) {
            Some(Ok(source)) => source,
            Some(Err(err)) => {
                log::warn!("QR_INSPECT_FORMAT_SOURCE: {err}, using sampled");
                FormatSource::Sampled
            }
            None => FormatSource::Sampled,
        }
    })
}

static MAX_DIM: OnceLock<Option<u32>> = OnceLock::new();

/// `QR_MAX_DIM`: longest image side allowed when loading files, 0 or unset disables
pub(crate) fn max_dim() -> Option<u32> {
    *MAX_DIM.get_or_init(|| match parse_env_u32("QR_MAX_DIM", 0) {
        0 => None,
        v => Some(v),
    })
}

/// Inspection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanConfig {
    /// Where reported mask pattern and EC level come from.
    ///
    /// With [`FormatSource::Decoder`] the locator's reading wins when it
    /// has one; sampling is the fallback.
    pub format_source: FormatSource,
}

impl ScanConfig {
    /// Settings from `QR_INSPECT_*` environment variables, read once per process
    pub fn from_env() -> Self {
        Self {
            format_source: format_source(),
        }
    }

    /// Override the format source
    pub fn with_format_source(mut self, format_source: FormatSource) -> Self {
        self.format_source = format_source;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sampled() {
        assert_eq!(ScanConfig::default().format_source, FormatSource::Sampled);
        let cfg = ScanConfig::default().with_format_source(FormatSource::Decoder);
        assert_eq!(cfg.format_source, FormatSource::Decoder);
    }

    #[test]
    fn test_parse_env_missing_uses_default() {
        assert_eq!(parse_env_u32("QR_INSPECT_TEST_SURELY_UNSET", 7), 7);
    }
}
