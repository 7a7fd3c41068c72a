use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Null => Ok(String::from("(no data)")),
        Value::Object(map) => {
            let headers = ["field", "value"];
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, table_options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    headers.sort();

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .map_or_else(|| n.to_string(), |amount| format!("{amount:.2}")),
        Value::Number(n) => n.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        // changed_fields: list the names flagged true.
        Value::Object(map) if map.values().all(Value::is_boolean) => map
            .iter()
            .filter(|(_, flag)| flag.as_bool() == Some(true))
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(","),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::{render, table::render_entity_table, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        ruc: &'static str,
        total: f64,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example {
            ruc: "20100070970",
            total: 1500.5,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["ruc"], "20100070970");
        assert_eq!(parsed["total"], 1500.5);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example {
            ruc: "20100070970",
            total: 1.0,
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_tabular() {
        let value = Example {
            ruc: "20100070970",
            total: 1500.5,
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("field")));
        assert!(out.contains("20100070970"));
        assert!(out.contains("1500.50"));
    }

    #[test]
    fn table_render_sorts_columns() {
        let rows = vec![
            Example {
                ruc: "20100070970",
                total: 10.0,
            },
            Example {
                ruc: "20555555551",
                total: 20.0,
            },
        ];
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().unwrap_or_default();
        assert!(header.find("ruc") < header.find("total"));
    }

    #[test]
    fn none_renders_as_no_data() {
        let out = render(&Option::<Example>::None, OutputFormat::Table).unwrap();
        assert_eq!(out, "(no data)");
    }

    #[test]
    fn cells_for_ledger_values() {
        assert_eq!(value_to_cell(&json!(null)), "-");
        assert_eq!(value_to_cell(&json!(600.0)), "600.00");
        assert_eq!(value_to_cell(&json!(42)), "42");
        assert_eq!(
            value_to_cell(&json!({"estado": true, "monto": false, "notas": true})),
            "estado,notas"
        );
        assert_eq!(value_to_cell(&json!(["a", "b"])), "a; b");
        assert_eq!(value_to_cell(&json!({"monto": 100})), r#"{"monto":100}"#);
    }

    #[test]
    fn table_alignment_handles_mixed_widths() {
        let headers = ["year", "total_assets", "warnings"];
        let rows = vec![
            vec!["2022".to_string(), "800.00".to_string(), "-".to_string()],
            vec![
                "2024".to_string(),
                "1000.00".to_string(),
                "2024: total liabilities are negative".to_string(),
            ],
        ];

        let table = render_entity_table(
            &headers,
            &rows,
            super::table::TableOptions {
                max_width: None,
                color: false,
            },
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("total_assets"));
        assert!(lines[1].chars().all(|c| c == '-'));
    }
}
