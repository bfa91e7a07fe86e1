//! tests/source_config_tests.rs
//! Lectura de filas y armado de filtros/patches por perfil.

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::config::source_config::SourceProfile;
    use crate::models::record_model::EmailStatus;
    use crate::services::rest_store::build_query;

    #[test]
    fn occurrence_row_reads_related_property() {
        let profile = SourceProfile::occurrences();
        let row = json!({
            "id": "a1",
            "email_status": "Não enviado",
            "properties": {
                "name": "Residencial Ipê",
                "address": "Rua Ipê\n45",
                "admin_email": "adm@ipe.com"
            }
        });

        let rec = profile.parse_record(&row).unwrap();
        assert_eq!(rec.id, "a1");
        assert_eq!(rec.status, EmailStatus::NaoEnviado);
        assert_eq!(rec.reference(), "a1");
        assert_eq!(rec.display.building.as_deref(), Some("Residencial Ipê"));
        assert_eq!(rec.display.address_line.as_deref(), Some("Rua Ipê"));
        assert_eq!(rec.display.number.as_deref(), Some("45"));
        assert_eq!(rec.recipient(), Some("adm@ipe.com"));
        assert!(rec.is_eligible());
    }

    #[test]
    fn related_property_may_come_as_array() {
        let profile = SourceProfile::occurrences();
        let row = json!({
            "id": "a1",
            "properties": [{ "admin_email": "adm@ipe.com" }]
        });
        assert_eq!(profile.read_recipient(&row).as_deref(), Some("adm@ipe.com"));
        // sin estado cuenta como "Não enviado"
        assert!(profile.row_is_eligible(&row));
    }

    #[test]
    fn blank_recipient_is_not_eligible() {
        let profile = SourceProfile::occurrences();
        let row = json!({
            "id": "a1",
            "email_status": "Não enviado",
            "properties": { "admin_email": "   " }
        });
        assert!(!profile.row_is_eligible(&row));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let profile = SourceProfile::occurrences();
        let row = json!({ "id": "a1", "email_status": "Perdido" });
        assert_eq!(profile.read_status(&row), None);
        assert!(profile.parse_record(&row).is_err());
    }

    #[test]
    fn spreadsheet_reference_prefers_contract() {
        let profile = SourceProfile::spreadsheet();
        let row = json!({
            "id": 12,
            "id_contrato": "CT-9",
            "numero_ocorrencia": "OC-1",
            "edificio": "Ed. Mar",
            "endereco": "Av. Atlântica",
            "numero": "1500",
            "complemento": "",
            "admin_email": "adm@mar.com",
            "processado": false
        });
        let rec = profile.parse_record(&row).unwrap();
        assert_eq!(rec.id, "12");
        assert_eq!(rec.reference(), "CT-9");
        assert_eq!(rec.display.number.as_deref(), Some("1500"));
        assert_eq!(rec.display.complement, None);
        assert!(rec.is_eligible());
    }

    #[test]
    fn spreadsheet_flag_maps_to_lifecycle() {
        let profile = SourceProfile::spreadsheet();
        assert_eq!(
            profile.read_status(&json!({ "processado": true })),
            Some(EmailStatus::AguardandoRetorno)
        );
        assert_eq!(
            profile.read_status(&json!({ "processado": false, "erro_processamento": "boom" })),
            Some(EmailStatus::ErroNoEnvio)
        );
        assert_eq!(
            profile.read_status(&json!({ "processado": null })),
            Some(EmailStatus::NaoEnviado)
        );
    }

    #[test]
    fn status_patch_sets_timestamp_only_when_waiting() {
        let profile = SourceProfile::occurrences();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let ok = profile.status_patch(EmailStatus::AguardandoRetorno, None, now);
        assert_eq!(
            ok,
            json!({
                "email_status": "Aguardando Retorno",
                "email_sent_at": "2024-05-01T12:00:00+00:00",
                "email_error": null
            })
        );

        let failed = profile.status_patch(EmailStatus::ErroNoEnvio, Some("Falha"), now);
        assert_eq!(
            failed,
            json!({
                "email_status": "Erro no Envio",
                "email_sent_at": null,
                "email_error": "Falha"
            })
        );
    }

    #[test]
    fn spreadsheet_patch_uses_boolean_flag() {
        let profile = SourceProfile::spreadsheet();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let reset = profile.status_patch(EmailStatus::NaoEnviado, None, now);
        assert_eq!(
            reset,
            json!({ "processado": false, "data_processamento": null, "erro_processamento": null })
        );
    }

    #[test]
    fn eligibility_query_is_encoded() {
        let profile = SourceProfile::occurrences();
        let query = build_query(&profile.eligibility_filters());
        assert_eq!(
            query,
            "email_status=eq.N%C3%A3o%20enviado&properties.admin_email=not.is.null"
        );

        let sheet = SourceProfile::spreadsheet();
        assert_eq!(
            build_query(&sheet.failed_filters()),
            "processado=eq.false&erro_processamento=not.is.null"
        );
    }
}
