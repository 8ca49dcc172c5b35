//! Plain-text result reports grouped by category.

use std::fmt;
use zwiftpower_client::ResultRow;

/// One category block of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection {
    pub category: String,
    pub lines: Vec<String>,
}

/// A team's results, grouped by category in the order categories first appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultReport {
    header: String,
    sections: Vec<CategorySection>,
}

impl ResultReport {
    /// Keep the rows belonging to `team_name` and group them by category.
    ///
    /// The team match is exact. Rows keep their source order inside a category.
    pub fn build<'a>(
        header: impl Into<String>,
        rows: impl IntoIterator<Item = &'a ResultRow>,
        team_name: &str,
    ) -> Self {
        let mut sections: Vec<CategorySection> = Vec::new();

        for row in rows.into_iter().filter(|row| row.team_name == team_name) {
            let line = format!("{} - {}", row.position_in_category, row.athlete_name);

            match sections.iter_mut().find(|s| s.category == row.category) {
                Some(section) => section.lines.push(line),
                None => sections.push(CategorySection {
                    category: row.category.clone(),
                    lines: vec![line],
                }),
            }
        }

        Self {
            header: header.into(),
            sections,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn sections(&self) -> &[CategorySection] {
        &self.sections
    }
}

impl fmt::Display for ResultReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for section in &self.sections {
            writeln!(f, "Category {}", section.category)?;
            for line in &section.lines {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

/// Build and render a report in one step.
pub fn render<'a>(
    header: impl Into<String>,
    rows: impl IntoIterator<Item = &'a ResultRow>,
    team_name: &str,
) -> String {
    ResultReport::build(header, rows, team_name).to_string()
}
