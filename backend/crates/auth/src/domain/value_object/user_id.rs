use kernel::id::{Id, markers};

pub type UserId = Id<markers::User>;

/// Parse the `sub` claim of a token (decimal user id)
pub fn parse_subject(sub: &str) -> Option<UserId> {
    let id: UserId = sub.parse().ok()?;
    (id.value() > 0).then_some(id)
}
