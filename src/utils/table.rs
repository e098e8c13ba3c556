/// Plain-text table for the console views
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
    right_aligned: Vec<bool>,
}

impl Table {
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        Table {
            col_widths: headers.iter().map(|h| h.chars().count()).collect(),
            right_aligned: vec![false; headers.len()],
            headers,
            rows: Vec::new(),
        }
    }

    /// Right-align the given columns (amounts, counts)
    pub fn align_right(mut self, columns: &[usize]) -> Self {
        for &col in columns {
            if let Some(flag) = self.right_aligned.get_mut(col) {
                *flag = true;
            }
        }
        self
    }

    /// Cells past the header count are dropped
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let cells: Vec<String> = row
            .iter()
            .take(self.headers.len())
            .map(|s| s.as_ref().to_string())
            .collect();
        for (width, cell) in self.col_widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.chars().count());
        }
        self.rows.push(cells);
    }

    pub fn render(&self) -> String {
        let separator = self
            .col_widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.render_row(&self.headers));
        lines.push(separator);
        lines.extend(self.rows.iter().map(|row| self.render_row(row)));

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }

    fn render_row(&self, row: &[String]) -> String {
        row.iter()
            .zip(self.col_widths.iter().zip(&self.right_aligned))
            .map(|(cell, (&width, &right))| {
                if right {
                    format!("{:>width$}", cell, width = width)
                } else {
                    format!("{:<width$}", cell, width = width)
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(&["Merchant ID", "Name", "Type"]);
        table.add_row(&["MCH-00001", "TechHub Electronics", "retail"]);
        table.add_row(&["MCH-00002", "Bean There", "restaurant"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Merchant ID | Name"));
        assert!(lines[1].starts_with("------------+-"));
        assert!(rendered.contains("TechHub Electronics"));
        assert!(rendered.contains("Bean There"));
    }

    #[test]
    fn test_columns_align_with_wide_cells() {
        let mut table = Table::new(&["ID", "Amount"]);
        table.add_row(&["12345", "9.99"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID    | Amount");
        assert_eq!(lines[2], "12345 | 9.99");
    }

    #[test]
    fn test_right_aligned_columns() {
        let mut table = Table::new(&["Card", "Count"]).align_right(&[1]);
        table.add_row(&["VISA", "3"]);
        table.add_row(&["MASTERCARD", "12"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Card       | Count");
        assert_eq!(lines[2], "VISA       |     3");
        assert_eq!(lines[3], "MASTERCARD |    12");
    }
}
