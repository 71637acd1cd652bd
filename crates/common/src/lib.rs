//! Shared building blocks for the service-order workspace: logging setup and
//! small response types used by more than one crate.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn log_format_parses_json_case_insensitively() {
        assert_eq!(utils::logging::LogFormat::parse("JSON"), utils::logging::LogFormat::Json);
        assert_eq!(utils::logging::LogFormat::parse("compact"), utils::logging::LogFormat::Compact);
        assert_eq!(utils::logging::LogFormat::parse(""), utils::logging::LogFormat::Compact);
    }
}
