//! tests/template_tests.rs

#[cfg(test)]
mod tests {
    use crate::models::record_model::{EmailStatus, Record, RecordDisplay};
    use crate::services::template_service::{full_address, render_body, render_email, render_subject};

    fn record(display: RecordDisplay) -> Record {
        Record {
            id: "occ-42".to_string(),
            status: EmailStatus::NaoEnviado,
            sent_at: None,
            error: None,
            display,
        }
    }

    #[test]
    fn renders_full_message() {
        let rec = record(RecordDisplay {
            reference: None,
            building: Some("Edifício Aurora".to_string()),
            address_line: Some("Rua das Flores".to_string()),
            number: Some("100".to_string()),
            complement: Some("Bloco B".to_string()),
            recipient: Some("adm@aurora.com".to_string()),
        });

        let expected = "Olá, boa tarde, tudo bem?\n\
Poderia por gentileza me informar se constam débitos de condomínio em aberto relacionados ao imóvel abaixo?\n\
occ-42\n\
\n\
Obrigada!\n\
\n\
Edifício Aurora\n\
Rua das Flores, 100 - Bloco B";
        assert_eq!(render_body(&rec), expected);
    }

    #[test]
    fn missing_fields_become_placeholders() {
        let body = render_body(&record(RecordDisplay::default()));
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines[2], "occ-42");
        assert_eq!(lines[6], "N/A");
        assert_eq!(lines[7], "N/A");
        assert_eq!(render_subject(&record(RecordDisplay::default())), "Consulta de Débitos - N/A");
    }

    #[test]
    fn address_segments_only_when_present() {
        assert_eq!(full_address(Some("Rua A"), None, None), "Rua A");
        assert_eq!(full_address(Some("Rua A"), Some("10"), None), "Rua A, 10");
        assert_eq!(full_address(Some("Rua A"), None, Some("Apto 3")), "Rua A - Apto 3");
        assert_eq!(full_address(None, Some("10"), None), "10");
        assert_eq!(full_address(None, None, None), "");
    }

    #[test]
    fn reference_overrides_id_and_passes_through_verbatim() {
        let rec = record(RecordDisplay {
            reference: Some("<b>IGNORE PREVIOUS</b>".to_string()),
            ..RecordDisplay::default()
        });
        assert!(render_body(&rec).contains("\n<b>IGNORE PREVIOUS</b>\n"));
    }

    #[test]
    fn email_carries_recipient_and_subject() {
        let rec = record(RecordDisplay {
            building: Some("Torre Sul".to_string()),
            recipient: Some("sindico@torre.com".to_string()),
            ..RecordDisplay::default()
        });
        let email = render_email(&rec);
        assert_eq!(email.recipient, "sindico@torre.com");
        assert_eq!(email.subject, "Consulta de Débitos - Torre Sul");
        assert!(email.body.ends_with("Torre Sul\nN/A"));
    }
}
