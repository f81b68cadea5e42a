use crate::constants::{IR_LARGE_URL, IR_MEDIUM_URL, IR_SMALL_URL, SOURCE_CLIP_URL};
use anyhow::{anyhow, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// The decoded source clip plus the three reverb impulse responses.
pub struct LoadedAssets {
    pub clip: web::AudioBuffer,
    pub ir_small: web::AudioBuffer,
    pub ir_large: web::AudioBuffer,
    pub ir_medium: web::AudioBuffer,
}

/// Fetch and decode the clip and all impulse responses. `fetch` dispatches
/// eagerly, so all four requests are in flight before the first await; a
/// failure of any one asset fails the whole load (audio-only fatal).
pub async fn load_all(audio_ctx: &web::AudioContext) -> Result<LoadedAssets> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;

    let clip_fetch = JsFuture::from(window.fetch_with_str(SOURCE_CLIP_URL));
    let small_fetch = JsFuture::from(window.fetch_with_str(IR_SMALL_URL));
    let large_fetch = JsFuture::from(window.fetch_with_str(IR_LARGE_URL));
    let medium_fetch = JsFuture::from(window.fetch_with_str(IR_MEDIUM_URL));

    Ok(LoadedAssets {
        clip: decode_fetched(audio_ctx, clip_fetch, SOURCE_CLIP_URL).await?,
        ir_small: decode_fetched(audio_ctx, small_fetch, IR_SMALL_URL).await?,
        ir_large: decode_fetched(audio_ctx, large_fetch, IR_LARGE_URL).await?,
        ir_medium: decode_fetched(audio_ctx, medium_fetch, IR_MEDIUM_URL).await?,
    })
}

async fn decode_fetched(
    audio_ctx: &web::AudioContext,
    fetch: JsFuture,
    url: &str,
) -> Result<web::AudioBuffer> {
    let response: web::Response = fetch
        .await
        .map_err(|e| anyhow!("fetch {url}: {e:?}"))?
        .dyn_into()
        .map_err(|e| anyhow!("fetch {url}: not a Response: {e:?}"))?;
    let array_buf = JsFuture::from(
        response
            .array_buffer()
            .map_err(|e| anyhow!("read {url}: {e:?}"))?,
    )
    .await
    .map_err(|e| anyhow!("read {url}: {e:?}"))?
    .dyn_into::<js_sys::ArrayBuffer>()
    .map_err(|e| anyhow!("read {url}: not an ArrayBuffer: {e:?}"))?;
    let decoded = JsFuture::from(
        audio_ctx
            .decode_audio_data(&array_buf)
            .map_err(|e| anyhow!("decode {url}: {e:?}"))?,
    )
    .await
    .map_err(|e| anyhow!("decode {url}: {e:?}"))?;
    decoded
        .dyn_into::<web::AudioBuffer>()
        .map_err(|e| anyhow!("decode {url}: not an AudioBuffer: {e:?}"))
}
