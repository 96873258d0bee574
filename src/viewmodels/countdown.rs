// ============================================================================
// COUNTDOWN - Un único tick por segundo para todas las celdas de cuenta atrás
// ============================================================================

use crate::utils::format::format_countdown;

#[derive(Clone, Debug, PartialEq, Eq)]
struct CountdownCell {
    element_id: String,
    unlock_secs: u64,
}

/// Celdas de cuenta atrás de la lista de posiciones
#[derive(Clone, Debug, Default)]
pub struct CountdownBoard {
    cells: Vec<CountdownCell>,
}

impl CountdownBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, element_id: impl Into<String>, unlock_secs: u64) {
        self.cells.push(CountdownCell { element_id: element_id.into(), unlock_secs });
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Texto de cada celda en `now_secs`. Las celdas vencidas reciben
    /// "Ready to claim" y dejan de seguirse.
    pub fn tick(&mut self, now_secs: u64) -> Vec<(String, String)> {
        let updates = self
            .cells
            .iter()
            .map(|cell| {
                let remaining = cell.unlock_secs as i64 - now_secs as i64;
                (cell.element_id.clone(), format_countdown(remaining))
            })
            .collect();
        self.cells.retain(|cell| cell.unlock_secs >= now_secs);
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_updates_every_cell() {
        let mut board = CountdownBoard::new();
        board.track("countdown-0", 1_000 + 90_061);
        board.track("countdown-3", 1_005);

        let updates = board.tick(1_000);

        assert_eq!(
            updates,
            vec![
                ("countdown-0".to_string(), "1d 1h 1m 1s".to_string()),
                ("countdown-3".to_string(), "0d 0h 0m 5s".to_string()),
            ]
        );
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn elapsed_cells_report_ready_and_stop() {
        let mut board = CountdownBoard::new();
        board.track("countdown-1", 100);

        assert_eq!(board.tick(100), vec![("countdown-1".to_string(), "0d 0h 0m 0s".to_string())]);
        assert_eq!(board.tick(101), vec![("countdown-1".to_string(), "Ready to claim".to_string())]);
        assert!(board.is_empty());
        assert!(board.tick(102).is_empty());
    }
}
