//! config/source_config.rs
//! Perfil de la fuente de registros: tabla, columnas de estado y campos a mostrar.
//! Un mismo batch sirve para ocurrencias y para la planilla cambiando solo esto.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::{
    config::app_config::AppConfig,
    models::record_model::{json_text, EmailStatus, Record, RecordDisplay},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    /// Tabla `occurrences` con los datos del imóvel en `properties`
    Occurrences,
    /// Tabla `spreadsheet_data` importada de la planilla
    Spreadsheet,
}

/// Cómo se guarda el estado en la tabla.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusColumn {
    /// Texto con los cuatro estados ("Não enviado", ...)
    Lifecycle(String),
    /// Booleano "procesado"; el error se deduce de la columna de error
    ProcessedFlag(String),
}

impl StatusColumn {
    pub fn name(&self) -> &str {
        match self {
            StatusColumn::Lifecycle(col) | StatusColumn::ProcessedFlag(col) => col,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusColumns {
    pub status: StatusColumn,
    pub sent_at: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayLayout {
    /// Campos dentro de un registro relacionado embebido (p.ej. `properties`)
    Related { relation: String },
    Flat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayColumns {
    pub layout: DisplayLayout,
    pub building: String,
    pub address: String,
    /// `None`: el número viene en la segunda línea de `address`
    pub number: Option<String>,
    pub complement: Option<String>,
    pub recipient: String,
    /// Columnas candidatas para el identificador del email, en orden
    pub reference: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceProfile {
    pub kind: SourceKind,
    pub table: String,
    pub select: String,
    pub status: StatusColumns,
    pub display: DisplayColumns,
    /// RPC de conteo del backend; `None` si no cubre esta tabla
    pub stats_rpc: Option<String>,
    /// Función remota de envío masivo para esta tabla
    pub remote_function: String,
}

impl SourceProfile {
    pub fn for_kind(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Occurrences => Self::occurrences(),
            SourceKind::Spreadsheet => Self::spreadsheet(),
        }
    }

    /// Perfil con los nombres de RPC y función remota del entorno.
    pub fn configured(kind: SourceKind, config: &AppConfig) -> Self {
        let mut profile = Self::for_kind(kind);
        match kind {
            SourceKind::Occurrences => {
                profile.stats_rpc = Some(config.stats_rpc_name.clone());
                profile.remote_function = config.remote_function_name.clone();
            }
            SourceKind::Spreadsheet => {
                profile.remote_function = config.spreadsheet_function_name.clone();
            }
        }
        profile
    }

    pub fn occurrences() -> Self {
        SourceProfile {
            kind: SourceKind::Occurrences,
            table: "occurrences".to_string(),
            select: "id,title,created_at,email_status,email_sent_at,email_error,\
                     properties!inner(name,address,admin_name,admin_email)"
                .to_string(),
            status: StatusColumns {
                status: StatusColumn::Lifecycle("email_status".to_string()),
                sent_at: "email_sent_at".to_string(),
                error: "email_error".to_string(),
            },
            display: DisplayColumns {
                layout: DisplayLayout::Related {
                    relation: "properties".to_string(),
                },
                building: "name".to_string(),
                address: "address".to_string(),
                number: None,
                complement: None,
                recipient: "admin_email".to_string(),
                reference: vec![],
            },
            stats_rpc: Some("get_email_stats".to_string()),
            remote_function: "send-bulk-emails".to_string(),
        }
    }

    pub fn spreadsheet() -> Self {
        SourceProfile {
            kind: SourceKind::Spreadsheet,
            table: "spreadsheet_data".to_string(),
            select: "*".to_string(),
            status: StatusColumns {
                status: StatusColumn::ProcessedFlag("processado".to_string()),
                sent_at: "data_processamento".to_string(),
                error: "erro_processamento".to_string(),
            },
            display: DisplayColumns {
                layout: DisplayLayout::Flat,
                building: "edificio".to_string(),
                address: "endereco".to_string(),
                number: Some("numero".to_string()),
                complement: Some("complemento".to_string()),
                recipient: "admin_email".to_string(),
                reference: vec!["id_contrato".to_string(), "numero_ocorrencia".to_string()],
            },
            stats_rpc: None,
            remote_function: "send-spreadsheet-emails".to_string(),
        }
    }

    /// Ruta del destinatario tal como la entiende el filtro REST.
    pub fn recipient_path(&self) -> String {
        match &self.display.layout {
            DisplayLayout::Related { relation } => {
                format!("{}.{}", relation, self.display.recipient)
            }
            DisplayLayout::Flat => self.display.recipient.clone(),
        }
    }

    /// Filtros `columna=operador.valor` para los registros elegibles.
    pub fn eligibility_filters(&self) -> Vec<(String, String)> {
        let mut filters = match &self.status.status {
            StatusColumn::Lifecycle(col) => vec![(
                col.clone(),
                format!("eq.{}", EmailStatus::NaoEnviado.as_str()),
            )],
            StatusColumn::ProcessedFlag(col) => vec![
                (col.clone(), "eq.false".to_string()),
                (self.status.error.clone(), "is.null".to_string()),
            ],
        };
        filters.push((self.recipient_path(), "not.is.null".to_string()));
        filters
    }

    /// Filtros para los registros en "Erro no Envio".
    pub fn failed_filters(&self) -> Vec<(String, String)> {
        match &self.status.status {
            StatusColumn::Lifecycle(col) => vec![(
                col.clone(),
                format!("eq.{}", EmailStatus::ErroNoEnvio.as_str()),
            )],
            StatusColumn::ProcessedFlag(col) => vec![
                (col.clone(), "eq.false".to_string()),
                (self.status.error.clone(), "not.is.null".to_string()),
            ],
        }
    }

    /// Columnas necesarias para contar estados.
    pub fn stats_select(&self) -> String {
        format!("{},{}", self.status.status.name(), self.status.error)
    }

    pub fn status_value(&self, status: EmailStatus) -> Value {
        match &self.status.status {
            StatusColumn::Lifecycle(_) => Value::String(status.as_str().to_string()),
            StatusColumn::ProcessedFlag(_) => Value::Bool(matches!(
                status,
                EmailStatus::AguardandoRetorno | EmailStatus::Enviado
            )),
        }
    }

    /// Cuerpo del PATCH: estado, fecha de envío (solo en "Aguardando Retorno")
    /// y mensaje de error.
    pub fn status_patch(
        &self,
        status: EmailStatus,
        error: Option<&str>,
        now: DateTime<Utc>,
    ) -> Value {
        let sent_at = if status == EmailStatus::AguardandoRetorno {
            Value::String(now.to_rfc3339())
        } else {
            Value::Null
        };

        let mut patch = Map::new();
        patch.insert(self.status.status.name().to_string(), self.status_value(status));
        patch.insert(self.status.sent_at.clone(), sent_at);
        patch.insert(
            self.status.error.clone(),
            error.map_or(Value::Null, |e| Value::String(e.to_string())),
        );
        Value::Object(patch)
    }

    /// Lee el estado de una fila. Sin valor cuenta como "Não enviado";
    /// un texto desconocido devuelve `None`.
    pub fn read_status(&self, row: &Value) -> Option<EmailStatus> {
        match &self.status.status {
            StatusColumn::Lifecycle(col) => match row.get(col) {
                None | Some(Value::Null) => Some(EmailStatus::NaoEnviado),
                Some(Value::String(s)) => EmailStatus::parse(s),
                Some(_) => None,
            },
            StatusColumn::ProcessedFlag(col) => {
                if row.get(col).and_then(Value::as_bool).unwrap_or(false) {
                    Some(EmailStatus::AguardandoRetorno)
                } else if json_text(row, &self.status.error).is_some() {
                    Some(EmailStatus::ErroNoEnvio)
                } else {
                    Some(EmailStatus::NaoEnviado)
                }
            }
        }
    }

    fn display_source<'a>(&self, row: &'a Value) -> Option<&'a Value> {
        match &self.display.layout {
            DisplayLayout::Related { relation } => match row.get(relation)? {
                // PostgREST devuelve un objeto (o un array si la relación es 1:N)
                Value::Array(items) => items.first(),
                other => Some(other),
            },
            DisplayLayout::Flat => Some(row),
        }
    }

    pub fn read_recipient(&self, row: &Value) -> Option<String> {
        self.display_source(row)
            .and_then(|src| json_text(src, &self.display.recipient))
    }

    /// Elegible: "Não enviado" y con destinatario.
    pub fn row_is_eligible(&self, row: &Value) -> bool {
        self.read_status(row) == Some(EmailStatus::NaoEnviado)
            && self.read_recipient(row).is_some()
    }

    pub fn read_display(&self, row: &Value) -> RecordDisplay {
        let cols = &self.display;
        let reference = cols.reference.iter().find_map(|c| json_text(row, c));

        let Some(src) = self.display_source(row) else {
            return RecordDisplay {
                reference,
                ..RecordDisplay::default()
            };
        };

        let raw_address = json_text(src, &cols.address);
        let (address_line, number) = match &cols.number {
            Some(number_col) => (raw_address, json_text(src, number_col)),
            None => split_address(raw_address.as_deref()),
        };

        RecordDisplay {
            reference,
            building: json_text(src, &cols.building),
            address_line,
            number,
            complement: cols.complement.as_ref().and_then(|c| json_text(src, c)),
            recipient: json_text(src, &cols.recipient),
        }
    }

    pub fn parse_record(&self, row: &Value) -> Result<Record> {
        let id = json_text(row, "id").ok_or_else(|| anyhow!("Registro sin id: {}", row))?;
        let status = self.read_status(row).ok_or_else(|| {
            anyhow!(
                "Estado desconocido en registro {}: {:?}",
                id,
                row.get(self.status.status.name())
            )
        })?;

        Ok(Record {
            status,
            sent_at: json_text(row, &self.status.sent_at),
            error: json_text(row, &self.status.error),
            display: self.read_display(row),
            id,
        })
    }

    /// Fila de prueba en estado inicial.
    pub fn seed_row(&self, recipient: &str, building: &str, property_id: Option<&str>) -> Value {
        match self.kind {
            SourceKind::Occurrences => json!({
                "title": "Teste de Email - Dados da Planilha",
                "description": "Registro criado para teste de envio",
                "status": "open",
                "priority": "medium",
                "property_id": property_id,
                "email_status": EmailStatus::NaoEnviado.as_str(),
            }),
            SourceKind::Spreadsheet => json!({
                "edificio": building,
                "endereco": "Rua Teste",
                "numero": "123",
                "complemento": "Apto 45",
                "admin_email": recipient,
                "numero_ocorrencia": format!("TESTE-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]),
                "processado": false,
            }),
        }
    }
}

/// `address` de `properties` guarda "calle\nnúmero".
fn split_address(address: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(address) = address else {
        return (None, None);
    };
    let mut lines = address
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);
    (lines.next(), lines.next())
}
