//! Structured text reports of a run, for reading in test output.

use std::fmt;

use assembly_types::{AssemblyStatus, ShapeKind};
use serde::Serialize;

use crate::workflow::AssemblyRun;

/// A complete run report.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub category: Option<String>,
    pub status: AssemblyStatus,
    pub progress_pct: f64,
    pub parts: Vec<PartEntry>,
    pub completions: Vec<u64>,
    pub frames_rendered: usize,
    pub errors: Vec<String>,
}

/// A single part's report entry.
#[derive(Debug, Clone, Serialize)]
pub struct PartEntry {
    pub index: usize,
    pub label: String,
    pub color: String,
    pub shape: ShapeKind,
    pub y: f64,
    pub scale: f64,
    pub visible: bool,
    pub highlighted: bool,
    /// Due time of this part's most recent reveal.
    pub revealed_at_ms: Option<u64>,
}

impl RunReport {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Assembly Run Report ===\n\n");

        if let Some(category) = &self.category {
            out.push_str(&format!("Category: {}\n", category));
        }
        out.push_str(&format!(
            "Status: {:?} ({:.1}%)\n",
            self.status, self.progress_pct
        ));

        let visible = self.parts.iter().filter(|p| p.visible).count();
        out.push_str(&format!(
            "\nParts ({} total, {} visible):\n",
            self.parts.len(),
            visible
        ));
        for p in &self.parts {
            let flags = match (p.visible, p.highlighted) {
                (true, true) => " [VISIBLE, HOVER]",
                (true, false) => " [VISIBLE]",
                (false, true) => " [HOVER]",
                (false, false) => "",
            };
            out.push_str(&format!(
                "  [{}] \"{}\" {:?} {} y={:.2} scale={:.2}{}\n",
                p.index, p.label, p.shape, p.color, p.y, p.scale, flags,
            ));
            if let Some(t) = p.revealed_at_ms {
                out.push_str(&format!("      revealed at {}ms\n", t));
            }
        }

        if !self.completions.is_empty() {
            let times: Vec<String> = self.completions.iter().map(|t| format!("{}ms", t)).collect();
            out.push_str(&format!("\nCompleted: {}\n", times.join(", ")));
        }
        out.push_str(&format!("Frames rendered: {}\n", self.frames_rendered));

        if self.errors.is_empty() {
            out.push_str("\nErrors: none\n");
        } else {
            out.push_str(&format!("\nErrors ({}):\n", self.errors.len()));
            for msg in &self.errors {
                out.push_str(&format!("  {}\n", msg));
            }
        }

        out
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl AssemblyRun {
    /// Generate a report of the current session.
    pub fn report(&self) -> RunReport {
        let view = self.view();
        let reveals = self.reveal_log();
        let parts = view
            .parts
            .iter()
            .map(|p| PartEntry {
                index: p.index,
                label: p.spec.label_text(),
                color: p.archetype.color.to_string(),
                shape: p.archetype.shape,
                y: p.position.y,
                scale: p.scale,
                visible: p.visible,
                highlighted: p.highlighted,
                revealed_at_ms: p
                    .visible
                    .then(|| reveals.iter().rev().find(|(i, _)| *i == p.index).map(|(_, t)| *t))
                    .flatten(),
            })
            .collect();

        RunReport {
            category: view.category.clone(),
            status: view.status,
            progress_pct: view.progress_pct,
            parts,
            completions: self.completion_times(),
            frames_rendered: self.frames().len(),
            errors: self.errors().to_vec(),
        }
    }
}
