//! tests/remote_tests.rs
//! Payloads de las funciones remotas y elección de función por fuente.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::config::app_config::AppConfig;
    use crate::config::source_config::{SourceKind, SourceProfile};
    use crate::models::remote_model::{RemoteBatchRequest, RemoteBatchResponse};
    use crate::services::remote_service::RemoteBatchService;

    fn config() -> AppConfig {
        AppConfig::from_lookup(|key| match key {
            "SUPABASE_URL" => Some("https://demo.supabase.co".to_string()),
            "SUPABASE_ANON_KEY" => Some("anon".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn request_body_uses_camel_case() {
        let body = serde_json::to_value(RemoteBatchRequest {
            limit: 10,
            test_mode: true,
        })
        .unwrap();
        assert_eq!(body, json!({ "limit": 10, "testMode": true }));
    }

    #[test]
    fn occurrence_response_parses() {
        let body = r#"{
            "success": true,
            "message": "Processamento concluído: 1 sucessos, 1 erros",
            "processed": 2,
            "testMode": true,
            "results": [
                { "occurrenceId": "a1", "email": "x@y.com", "status": "success", "message": "Email enviado" },
                { "occurrenceId": "a2", "email": "z@y.com", "status": "error", "message": "SendGrid 400" }
            ]
        }"#;
        let resp: RemoteBatchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(resp.processed, 2);
        assert!(resp.test_mode);
        assert_eq!(resp.results[0].record_id, "a1");
        assert!(resp.results[0].is_success());
        assert!(!resp.results[1].is_success());
        assert_eq!(resp.results[1].message.as_deref(), Some("SendGrid 400"));
    }

    #[test]
    fn spreadsheet_response_with_numeric_ids_parses() {
        let body = r#"{
            "success": true,
            "message": "Processamento concluído: 1 sucessos, 0 erros",
            "processed": 1,
            "testMode": false,
            "results": [
                { "recordId": 42, "idImovel": "OC-9", "email": "adm@sol.com", "status": "success", "message": "ok" }
            ]
        }"#;
        let resp: RemoteBatchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.results[0].record_id, "42");
        assert_eq!(resp.results[0].email.as_deref(), Some("adm@sol.com"));
    }

    #[test]
    fn empty_run_response_has_no_results() {
        let body = r#"{ "success": true, "message": "Nenhum registro da planilha encontrado para envio", "processed": 0 }"#;
        let resp: RemoteBatchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(resp.processed, 0);
        assert!(resp.results.is_empty());
    }

    #[test]
    fn function_is_chosen_by_source() {
        let cfg = config();

        let occurrences = SourceProfile::configured(SourceKind::Occurrences, &cfg);
        let spreadsheet = SourceProfile::configured(SourceKind::Spreadsheet, &cfg);

        assert_eq!(
            RemoteBatchService::new(&cfg, &occurrences).function_url(),
            "https://demo.supabase.co/functions/v1/send-bulk-emails"
        );
        assert_eq!(
            RemoteBatchService::new(&cfg, &spreadsheet).function_url(),
            "https://demo.supabase.co/functions/v1/send-spreadsheet-emails"
        );
        assert_eq!(occurrences.stats_rpc.as_deref(), Some("get_email_stats"));
        assert!(spreadsheet.stats_rpc.is_none());
    }
}
