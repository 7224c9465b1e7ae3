//! Blog post storage.
//!
//! Redis key patterns:
//! - `blog:{nanoid}`: post data (JSON, no expiry)
//! - `blog_slug:{slug}`: slug lookup to post id (STRING)
//! - `blog_ids`: SET of all post ids

use super::{from_json, load_indexed, to_json};
use crate::models::BlogPost;
use redis::AsyncCommands;

const BLOG_INDEX: &str = "blog_ids";

/// Store a new post, claiming its slug.
///
/// A single Lua script claims the slug and writes the post so two concurrent
/// posts with the same slug cannot both succeed.
///
/// Returns false if the slug is already taken (nothing is written).
pub async fn create_post<C>(con: &mut C, post: &BlogPost) -> Result<bool, redis::RedisError>
where
    C: AsyncCommands,
{
    let slug_key = format!("blog_slug:{}", post.slug);
    let post_key = format!("blog:{}", post.id);

    let script = redis::Script::new(
        r"
        if redis.call('SETNX', KEYS[1], ARGV[1]) == 0 then
            return 0
        end
        redis.call('SET', KEYS[2], ARGV[2])
        redis.call('SADD', KEYS[3], ARGV[1])
        return 1
        ",
    );

    let created: i32 = script
        .key(&slug_key)
        .key(&post_key)
        .key(BLOG_INDEX)
        .arg(&post.id)
        .arg(to_json(post)?)
        .invoke_async(con)
        .await?;

    Ok(created == 1)
}

/// Look up a post by slug.
pub async fn get_post_by_slug<C>(
    con: &mut C,
    slug: &str,
) -> Result<Option<BlogPost>, redis::RedisError>
where
    C: AsyncCommands,
{
    let slug_key = format!("blog_slug:{}", slug);
    let id: Option<String> = con.get(&slug_key).await?;

    let Some(id) = id else {
        return Ok(None);
    };

    let json: Option<String> = con.get(format!("blog:{}", id)).await?;
    json.map(|data| from_json(&data)).transpose()
}

/// List all posts, most recently published first.
pub async fn list_posts<C>(con: &mut C) -> Result<Vec<BlogPost>, redis::RedisError>
where
    C: AsyncCommands,
{
    let mut posts: Vec<BlogPost> = load_indexed(con, BLOG_INDEX, "blog:").await?;
    sort_by_publish_date(&mut posts);
    Ok(posts)
}

/// Number of published posts.
pub async fn count_posts<C>(con: &mut C) -> Result<usize, redis::RedisError>
where
    C: AsyncCommands,
{
    con.scard(BLOG_INDEX).await
}

/// Newest first. Posts with an unparseable publish date sort last.
fn sort_by_publish_date(posts: &mut [BlogPost]) {
    posts.sort_by_key(|p| std::cmp::Reverse(p.published_millis()));
}
