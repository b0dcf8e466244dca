//! CSV export of every round played
//!
//! One row per [`RoundRecord`]: round, opponent, agent_move, opponent_move,
//! outcome, epsilon. The sentinel opponent move and unscored outcomes are
//! written as empty cells.

use std::{fs::File, path::Path};

use crate::{
    Result,
    ports::{Observer, RoundRecord},
};

/// Observer writing the round history to a CSV file
pub struct HistoryCsvObserver {
    writer: csv::Writer<File>,
}

impl HistoryCsvObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let writer = csv::Writer::from_path(path)?;
        Ok(Self { writer })
    }
}

impl Observer for HistoryCsvObserver {
    fn on_round(&mut self, record: &RoundRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rps::{Move, RoundOutcome};

    #[test]
    fn test_writes_header_and_rows() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut observer = HistoryCsvObserver::new(tmp.path()).unwrap();

        observer
            .on_round(&RoundRecord {
                round: 0,
                opponent: "cycle".to_string(),
                agent_move: Move::Paper,
                opponent_move: None,
                outcome: None,
                epsilon: 1.0,
            })
            .unwrap();
        observer
            .on_round(&RoundRecord {
                round: 1,
                opponent: "cycle".to_string(),
                agent_move: Move::Rock,
                opponent_move: Some(Move::Rock),
                outcome: Some(RoundOutcome::Win),
                epsilon: 0.5,
            })
            .unwrap();
        observer.on_training_end().unwrap();

        let contents = std::fs::read_to_string(tmp.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "round,opponent,agent_move,opponent_move,outcome,epsilon"
        );
        assert_eq!(lines[1], "0,cycle,P,,,1.0");
        assert_eq!(lines[2], "1,cycle,R,R,win,0.5");
    }
}
