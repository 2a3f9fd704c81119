//! HTML fragments for metric tables and figures

use crate::error::{Error, Result};
use crate::metrics::{MetricMap, MetricValue};
use crate::plot::{FigureContent, FigureMap};

/// Escape HTML special characters
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn format_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.4}")
    }
}

fn format_row(values: impl Iterator<Item = f64>) -> String {
    let cells: Vec<String> = values.map(format_number).collect();
    format!("[{}]", cells.join(", "))
}

pub(crate) fn format_value(value: &MetricValue) -> String {
    match value {
        MetricValue::Scalar(v) => format_number(*v),
        MetricValue::Vector(v) => format_row(v.iter().copied()),
        MetricValue::Matrix(m) => {
            let rows: Vec<String> = m.rows().into_iter().map(|r| format_row(r.iter().copied())).collect();
            format!("[{}]", rows.join(", "))
        }
    }
}

pub(crate) fn metrics_table(metrics: &MetricMap) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"metrics\">\n");
    html.push_str("<thead><tr><th>metric</th><th>value</th></tr></thead>\n<tbody>\n");
    for (name, value) in metrics.iter() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(name),
            escape_html(&format_value(value))
        ));
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

pub(crate) fn figures_block(figures: &FigureMap) -> Result<String> {
    let mut html = String::new();
    for (name, figure) in figures.iter() {
        html.push_str(&format!("<figure data-name=\"{}\">\n", escape_html(name)));
        html.push_str(&format!(
            "<figcaption>{}</figcaption>\n",
            escape_html(figure.spec.title())
        ));
        match &figure.content {
            FigureContent::Text(text) => {
                html.push_str(&format!("<pre>{}</pre>\n", escape_html(text)));
            }
            FigureContent::Json(value) => {
                let json = serde_json::to_string(value)
                    .map_err(|e| Error::Serialization(format!("figure '{name}': {e}")))?;
                // A literal "</" would close the script element early
                html.push_str(&format!(
                    "<script type=\"application/json\">{}</script>\n",
                    json.replace("</", "<\\/")
                ));
            }
        }
        html.push_str("</figure>\n");
    }
    Ok(html)
}
