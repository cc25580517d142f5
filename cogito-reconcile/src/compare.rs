//! Username-set comparison between the two user lists.

use std::collections::HashSet;

use cogito_core::{UserRecord, Username};

/// Records present on only one side, in their original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    pub only_local: Vec<UserRecord>,
    pub only_server: Vec<UserRecord>,
}

impl Comparison {
    pub fn is_in_sync(&self) -> bool {
        self.only_local.is_empty() && self.only_server.is_empty()
    }
}

/// Split both lists into the records whose username the other side lacks.
///
/// Only usernames are compared; a user whose email or role differs between
/// the two sides counts as present on both.
pub fn compare(local: &[UserRecord], server: &[UserRecord]) -> Comparison {
    let local_names = usernames(local);
    let server_names = usernames(server);

    Comparison {
        only_local: exclusive(local, &server_names),
        only_server: exclusive(server, &local_names),
    }
}

fn usernames(users: &[UserRecord]) -> HashSet<&Username> {
    users.iter().map(|u| &u.username).collect()
}

fn exclusive(users: &[UserRecord], other: &HashSet<&Username>) -> Vec<UserRecord> {
    users
        .iter()
        .filter(|u| !other.contains(&u.username))
        .cloned()
        .collect()
}
