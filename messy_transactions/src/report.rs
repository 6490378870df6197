use crate::corruption::RuleOutcome;
use comfy_table::{Cell, Table};
use getset::Getters;
use serde::Serialize;

/// Summary of one generation run: table sizes and what each corruption rule did.
#[derive(Debug, Clone, Getters, Serialize)]
#[getset(get = "pub")]
pub struct DirtyingReport {
    /// Rows in the pristine table.
    pristine_rows: usize,
    /// Rows in the delivered table, duplicates included.
    final_rows: usize,
    /// Per-rule, per-column outcomes in the order the rules ran.
    outcomes: Vec<RuleOutcome>,
}

impl DirtyingReport {
    pub fn new(pristine_rows: usize, final_rows: usize, outcomes: Vec<RuleOutcome>) -> Self {
        Self {
            pristine_rows,
            final_rows,
            outcomes,
        }
    }

    /// Total cells or rows touched by `rule`.
    pub fn rows_affected_by(&self, rule: &str) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.rule() == rule)
            .map(|o| *o.rows_affected())
            .sum()
    }

    /// Prints a formatted summary of the run to the console.
    pub fn summary(&self) {
        println!("Dirty Transaction Dataset");
        println!("========================================");
        println!("Pristine rows: {}", self.pristine_rows);
        println!("Final rows:    {}", self.final_rows);
        println!();

        let mut table = Table::new();
        table.set_header(vec!["Rule", "Column", "Rows", "Detail"]);
        for outcome in &self.outcomes {
            table.add_row(vec![
                Cell::new(outcome.rule()),
                Cell::new(outcome.column()),
                Cell::new(outcome.rows_affected()),
                Cell::new(outcome.detail()),
            ]);
        }
        println!("Corruption Rules");
        println!("{}", table);
    }

    /// Exports the report to a Markdown table.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("### Dirty Transaction Dataset\n\n");
        md.push_str(&format!(
            "Pristine rows: {}, final rows: {}\n\n",
            self.pristine_rows, self.final_rows
        ));
        md.push_str("| Rule | Column | Rows | Detail |\n");
        md.push_str("|---|---|---|---|\n");
        for outcome in &self.outcomes {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                outcome.rule(),
                outcome.column(),
                outcome.rows_affected(),
                outcome.detail()
            ));
        }
        md
    }

    /// Exports the report to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> DirtyingReport {
        DirtyingReport::new(
            100,
            110,
            vec![
                RuleOutcome::new("hidden_nulls", "product_cost", 3, "placeholder"),
                RuleOutcome::new("hidden_nulls", "competitor_price", 2, "not available"),
                RuleOutcome::new("duplicate_rows", "*", 10, "copied"),
            ],
        )
    }

    #[test]
    fn sums_outcomes_per_rule() {
        let report = report();
        assert_eq!(report.rows_affected_by("hidden_nulls"), 5);
        assert_eq!(report.rows_affected_by("duplicate_rows"), 10);
        assert_eq!(report.rows_affected_by("category_text"), 0);
    }

    #[test]
    fn exports_markdown_and_json() {
        let report = report();
        let md = report.to_markdown();
        assert!(md.contains("| Rule | Column | Rows | Detail |"));
        assert!(md.contains("| hidden_nulls | product_cost | 3 | placeholder |"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["pristine_rows"], 100);
        assert_eq!(json["final_rows"], 110);
        assert_eq!(json["outcomes"][2]["rule"], "duplicate_rows");
    }
}
