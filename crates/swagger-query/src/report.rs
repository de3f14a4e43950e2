//! Plain-text rendering of query results

use crate::query::*;
use crate::types::Parameter;
use serde::Serialize;
use std::fmt;

/// Two-space indented JSON
fn write_json<T: Serialize + ?Sized>(f: &mut fmt::Formatter<'_>, value: &T) -> fmt::Result {
    let text = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
    writeln!(f, "{}", text)
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Inline {
                name,
                location,
                required,
            } => write!(f, "- Name: {}, In: {}, Required: {}", name, location, required),
            Parameter::Reference(reference) => write!(f, "- Ref: {}", reference),
        }
    }
}

impl fmt::Display for ListingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Base Path: {}", self.base_path)?;
        writeln!(f)?;
        writeln!(f, "Relevant Endpoints:")?;
        for line in &self.endpoints {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Display for DetailReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections = 0;

        if matches!(self.view, DetailView::Request | DetailView::Full) {
            writeln!(f, "Parameters for {} {}:", self.method, self.path)?;
            for param in &self.parameters {
                writeln!(f, "{}", param)?;
            }
            writeln!(f)?;
            writeln!(f, "Request Body:")?;
            if let Some(body) = &self.request_body {
                write_json(f, body)?;
            }
            sections += 1;
        }

        if matches!(self.view, DetailView::Response | DetailView::Full) {
            if sections > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Responses for {} {}:", self.method, self.path)?;
            if let Some(responses) = &self.responses {
                write_json(f, responses)?;
            }
            if let Some(schemas) = &self.schemas {
                writeln!(f)?;
                writeln!(f, "Schemas:")?;
                write_json(f, schemas)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for NotFoundReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.missing {
            Missing::Path => writeln!(f, "Path {} not found in Swagger.", self.path)?,
            Missing::Method => writeln!(
                f,
                "Method {} not found for path {} in Swagger.",
                self.method, self.path
            )?,
        }
        writeln!(f, "Available paths:")?;
        for path in &self.candidates {
            writeln!(f, "{}", path)?;
        }
        Ok(())
    }
}

impl fmt::Display for OperationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationReport::Detail(detail) => fmt::Display::fmt(detail, f),
            OperationReport::NotFound(not_found) => fmt::Display::fmt(not_found, f),
        }
    }
}
