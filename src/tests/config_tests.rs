//! tests/config_tests.rs

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use crate::config::app_config::{AppConfig, MailTransportConfig};

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_with_only_credentials() {
        let cfg = load(&[
            ("SUPABASE_URL", "https://demo.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
        ])
        .unwrap();

        assert_eq!(cfg.rest_url(), "https://demo.supabase.co/rest/v1");
        assert_eq!(cfg.functions_url(), "https://demo.supabase.co/functions/v1");
        assert_eq!(cfg.bearer_token, "anon");
        assert_eq!(cfg.transport, MailTransportConfig::None);
        assert_eq!(cfg.batch_pause, Duration::from_secs(1));
        assert_eq!(cfg.remote_function_timeout, Duration::from_secs(300));
        assert_eq!(cfg.remote_function_name, "send-bulk-emails");
        assert_eq!(cfg.spreadsheet_function_name, "send-spreadsheet-emails");
        assert_eq!(cfg.stats_rpc_name, "get_email_stats");
        assert_eq!(cfg.mail_from_name, "Sistema de Gestão");
    }

    #[test]
    fn missing_credentials_fail() {
        let err = load(&[("SUPABASE_URL", "https://demo.supabase.co")]).unwrap_err();
        assert!(err.to_string().contains("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn smtp_transport_uses_user_as_sender() {
        let cfg = load(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("SUPABASE_BEARER_TOKEN", "service"),
            ("MAIL_TRANSPORT", "SMTP"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "bot@example.com"),
            ("SMTP_PASS", "secret"),
            ("BATCH_PAUSE_MS", "0"),
        ])
        .unwrap();

        assert_eq!(cfg.bearer_token, "service");
        assert_eq!(
            cfg.transport,
            MailTransportConfig::Smtp {
                host: "smtp.example.com".to_string(),
                port: 587,
                user: "bot@example.com".to_string(),
                pass: "secret".to_string(),
            }
        );
        assert_eq!(cfg.mail_from.as_deref(), Some("bot@example.com"));
        assert!(cfg.batch_pause.is_zero());
    }

    #[test]
    fn sendgrid_requires_sender() {
        let err = load(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("MAIL_TRANSPORT", "sendgrid"),
            ("SENDGRID_API_KEY", "SG.x"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("MAIL_FROM"));
    }

    #[test]
    fn unknown_transport_is_rejected() {
        assert!(load(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("MAIL_TRANSPORT", "carrier-pigeon"),
        ])
        .is_err());
    }
}
