use crate::dfa::DFA;
use crate::nfa::NFA;
use crate::parser::LabelOrder;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DfaTableRow {
    name: String,
    composition: Vec<String>,
    initial: bool,
    accepting: bool,
    cells: Vec<Option<String>>, // one per alphabet symbol, `None` when undefined
}

impl DfaTableRow {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_composition(&self) -> &[String] {
        &self.composition
    }

    pub fn is_initial(&self) -> bool {
        self.initial
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn get_cells(&self) -> &[Option<String>] {
        &self.cells
    }
}

/// Row-oriented view of a DFA for display: a corner cell followed by the
/// alphabet as columns, then one row per DFA state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DfaTable {
    columns: Vec<String>,
    rows: Vec<DfaTableRow>,
}

impl DfaTable {
    const UNDEFINED_CELL: &'static str = "-";

    pub fn new(nfa: &NFA, dfa: &DFA, label_order: LabelOrder) -> Self {
        let mut columns = vec![String::new()];
        columns.extend(nfa.get_alphabet().iter().cloned());

        let rows = dfa
            .states()
            .map(|state| {
                let row = dfa.get_row(state);
                let mut composition = nfa.labels_of(row.get_composition());
                label_order.sort(&mut composition);
                DfaTableRow {
                    name: row.get_name().to_string(),
                    composition: composition.into_iter().map(str::to_string).collect(),
                    initial: state == dfa.get_root(),
                    accepting: row.is_accepting(),
                    cells: row
                        .get_transitions()
                        .iter()
                        .map(|t| t.map(|s| dfa.get_name(s).to_string()))
                        .collect(),
                }
            })
            .collect();

        Self { columns, rows }
    }

    pub fn get_columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get_rows(&self) -> &[DfaTableRow] {
        &self.rows
    }
}

impl fmt::Display for DfaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut grid: Vec<Vec<String>> = vec![self.columns.clone()];
        for row in &self.rows {
            let mut line = vec![format!(
                "{}{}{} {{{}}}",
                if row.initial { "->" } else { "" },
                if row.accepting { "*" } else { "" },
                row.name,
                row.composition.join(",")
            )];
            line.extend(row.cells.iter().map(|cell| {
                cell.clone()
                    .unwrap_or_else(|| Self::UNDEFINED_CELL.to_string())
            }));
            grid.push(line);
        }

        let mut widths = vec![0usize; self.columns.len()];
        for line in &grid {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for line in &grid {
            let padded: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect();
            writeln!(f, "{}", padded.join(" | ").trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::Result;
    use crate::parser::{parse, NamingScheme};

    #[test]
    fn test_table_rows() -> Result<()> {
        let nfa = parse("Q:{0,1,2}\nL:{a,b}\ni:0\nA:{2}\nW:{(0;1;a),(1;2;b),(0;0;b)}")?;
        let dfa = DFA::from_nfa(&nfa, NamingScheme::Letters)?;
        let table = DfaTable::new(&nfa, &dfa, LabelOrder::Declaration);

        assert_eq!(table.get_columns(), &["", "a", "b"]);
        let rows = table.get_rows();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_initial());
        assert!(!rows[1].is_initial());
        assert!(rows[2].is_accepting());
        assert_eq!(
            rows[0].get_cells(),
            &[Some("B".to_string()), Some("A".to_string())]
        );
        assert_eq!(rows[1].get_cells(), &[None, Some("C".to_string())]);
        assert_eq!(rows[2].get_cells(), &[None, None]);

        assert_eq!(
            table.to_string(),
            "        | a | b\n->A {0} | B | A\nB {1}   | - | C\n*C {2}  | - | -\n"
        );
        Ok(())
    }

    #[test]
    fn test_composition_order() -> Result<()> {
        let nfa = parse("Q:{q10,q2,q1}\nL:{x}\ni:q10\nA:{q1}\nW:{(q10;q2;e),(q10;q1;e)}")?;
        let dfa = DFA::from_nfa(&nfa, NamingScheme::Letters)?;

        let table = DfaTable::new(&nfa, &dfa, LabelOrder::Declaration);
        assert_eq!(table.get_rows()[0].get_composition(), &["q10", "q2", "q1"]);

        let table = DfaTable::new(&nfa, &dfa, LabelOrder::Lexicographic);
        assert_eq!(table.get_rows()[0].get_composition(), &["q1", "q10", "q2"]);
        Ok(())
    }
}
