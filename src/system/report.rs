//! Text report of a system's rows and matrix diagnostics.

use std::fmt;

use num_rational::BigRational;
use num_traits::{One, Signed};

use super::System;

impl System {
    fn write_row(&self, f: &mut fmt::Formatter<'_>, row: usize) -> fmt::Result {
        let tableau = self.tableau();
        let mut monomials: Vec<(usize, BigRational)> = tableau
            .row_term(row)
            .iter()
            .map(|(j, c)| (j, c.clone()))
            .collect();
        monomials.sort_by_key(|(j, _)| *j);

        write!(f, "{} =", tableau.var_name(tableau.basic_var(row)))?;
        if monomials.is_empty() {
            return writeln!(f, " 0");
        }
        for (n, (j, c)) in monomials.iter().enumerate() {
            let sign = if c.is_negative() { "-" } else { "+" };
            if n == 0 {
                write!(f, " {}", if c.is_negative() { "-" } else { "" })?;
            } else {
                write!(f, " {} ", sign)?;
            }
            let magnitude = c.abs();
            if !magnitude.is_one() {
                write!(f, "{}*", magnitude)?;
            }
            write!(f, "{}", tableau.var_name(*j))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tableau = self.tableau();
        let matrix = tableau.matrix();
        for row in 0..tableau.row_count() {
            self.write_row(f, row)?;
        }

        writeln!(f, "; rows: {}", matrix.row_count())?;
        writeln!(f, "; columns: {}", matrix.column_count())?;
        writeln!(f, "; non-zeroes: {}", matrix.number_of_non_zeroes())?;
        writeln!(f, "; balance: {}", matrix.get_balance())?;

        let register = tableau.register();
        let ints: Vec<String> = (0..register.size())
            .filter(|&j| register.local_is_int(j))
            .map(|j| tableau.var_name(j))
            .collect();
        if !ints.is_empty() {
            writeln!(f, "; integer: {}", ints.join(" "))?;
        }
        if tableau.scope_depth() > 0 {
            writeln!(f, "; open scopes: {}", tableau.scope_depth())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::dsl;
    use crate::system::System;
    use crate::tableau::TableauConfig;

    fn report(input: &str) -> String {
        let ast = dsl::parse(input).unwrap();
        System::from_ast(ast, TableauConfig::default())
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_report_rows() {
        let text = report(".int y\ns = x - 1/2 y\nt = -x");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("s = -1/2*y + x"));
        assert_eq!(lines.next(), Some("t = -x"));
        assert!(text.contains("; rows: 2\n"));
        assert!(text.contains("; columns: 4\n"));
        assert!(text.contains("; non-zeroes: 5\n"));
        assert!(text.contains("; integer: y\n"));
    }

    #[test]
    fn test_report_after_pivot() {
        let text = report("s = x + 2 y\n.pivot s x");
        assert_eq!(text.lines().next(), Some("x = -2*y + s"));
    }

    #[test]
    fn test_report_balance() {
        // row: s - 2x - 3y, balance 1 + 2 + 3
        let text = report("s = 2 x + 3 y");
        assert!(text.contains("; balance: 6\n"));
    }
}
