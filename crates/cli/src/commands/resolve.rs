use crate::context::AppContext;
use feedwatch_core::Result;

/// Resolve a reference through the persistent cache and print the id
pub async fn execute(ctx: &AppContext, reference: &str) -> Result<()> {
    let cache = ctx.resolution_cache()?;
    let cached = cache.cached(reference).is_some();
    let id = cache.resolve(reference).await?;

    if cached {
        println!("{id} (cached)");
    } else {
        println!("{id}");
    }
    Ok(())
}
