//! Contact lead storage.
//!
//! Redis key patterns:
//! - `contact:{nanoid}`: lead data (JSON, no expiry)
//! - `contact_ids`: SET of all lead ids

use super::{load_indexed, to_json};
use crate::models::ContactLead;
use redis::AsyncCommands;

const CONTACT_INDEX: &str = "contact_ids";

/// Store a contact lead permanently and add it to the index.
pub async fn store_contact<C>(con: &mut C, lead: &ContactLead) -> Result<(), redis::RedisError>
where
    C: AsyncCommands,
{
    let key = format!("contact:{}", lead.id);

    let script = redis::Script::new(
        r"
        redis.call('SET', KEYS[1], ARGV[1])
        redis.call('SADD', KEYS[2], ARGV[2])
        return 1
        ",
    );

    let _: i32 = script
        .key(&key)
        .key(CONTACT_INDEX)
        .arg(to_json(lead)?)
        .arg(&lead.id)
        .invoke_async(con)
        .await?;
    Ok(())
}

/// List all contact leads, newest first.
pub async fn list_contacts<C>(con: &mut C) -> Result<Vec<ContactLead>, redis::RedisError>
where
    C: AsyncCommands,
{
    let mut leads: Vec<ContactLead> = load_indexed(con, CONTACT_INDEX, "contact:").await?;
    sort_newest_first(&mut leads);
    Ok(leads)
}

/// Number of stored leads.
pub async fn count_contacts<C>(con: &mut C) -> Result<usize, redis::RedisError>
where
    C: AsyncCommands,
{
    con.scard(CONTACT_INDEX).await
}

fn sort_newest_first(leads: &mut [ContactLead]) {
    leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(id: &str, created_at: u64) -> ContactLead {
        ContactLead {
            id: id.to_string(),
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            company: "Acme".to_string(),
            marketing_spend: None,
            location: "Berlin".to_string(),
            content: "Hi".to_string(),
            created_at,
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut leads = vec![lead("old", 100), lead("new", 300), lead("mid", 200)];
        sort_newest_first(&mut leads);
        let ids: Vec<&str> = leads.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_keeps_ties_stable() {
        let mut leads = vec![lead("a", 100), lead("b", 100), lead("c", 50)];
        sort_newest_first(&mut leads);
        let ids: Vec<&str> = leads.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
