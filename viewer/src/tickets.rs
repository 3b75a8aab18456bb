//! Request tickets.
//!
//! Responses can complete in any order. Every request takes a ticket for its
//! stage; only the response holding the latest ticket of that stage may
//! touch the view state.

/// Independent request streams of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Database listing.
    Catalog,
    Upload,
    Tables,
    Columns,
    Data,
}

impl Stage {
    fn index(self) -> usize {
        match self {
            Stage::Catalog => 0,
            Stage::Upload => 1,
            Stage::Tables => 2,
            Stage::Columns => 3,
            Stage::Data => 4,
        }
    }
}

/// Tag carried by one outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub stage: Stage,
    pub seq: u64,
}

/// Latest sequence number per stage.
#[derive(Debug, Default)]
pub struct RequestTickets {
    latest: [u64; 5],
}

impl RequestTickets {
    /// Issues a new ticket, superseding every earlier one of the stage.
    pub fn issue(&mut self, stage: Stage) -> Ticket {
        let seq = &mut self.latest[stage.index()];
        *seq += 1;
        Ticket { stage, seq: *seq }
    }

    /// Supersedes all in-flight tickets of the stage without issuing one.
    pub fn invalidate(&mut self, stage: Stage) {
        self.latest[stage.index()] += 1;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest[ticket.stage.index()] == ticket.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let mut tickets = RequestTickets::default();
        let first = tickets.issue(Stage::Tables);
        let second = tickets.issue(Stage::Tables);
        assert!(!tickets.is_current(first));
        assert!(tickets.is_current(second));
    }

    #[test]
    fn test_stages_are_independent() {
        let mut tickets = RequestTickets::default();
        let tables = tickets.issue(Stage::Tables);
        let columns = tickets.issue(Stage::Columns);
        tickets.issue(Stage::Data);
        assert!(tickets.is_current(tables));
        assert!(tickets.is_current(columns));
    }

    #[test]
    fn test_catalog_reload_keeps_upload_current() {
        let mut tickets = RequestTickets::default();
        let upload = tickets.issue(Stage::Upload);
        tickets.issue(Stage::Catalog);
        assert!(tickets.is_current(upload));
    }

    #[test]
    fn test_invalidate() {
        let mut tickets = RequestTickets::default();
        let data = tickets.issue(Stage::Data);
        tickets.invalidate(Stage::Data);
        assert!(!tickets.is_current(data));
        assert_eq!(tickets.issue(Stage::Data).seq, 3);
    }
}
