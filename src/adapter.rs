//! The single network boundary: one generation request per prompt, all in
//! flight at once, every failure folded into its own result record.

use crate::config::Config;
use crate::constants::{
    RequestType, GEMINI_IMAGE_MODEL, IMAGEN_MODEL, IMAGEN_OUTPUT_MIME, MSG_NO_IMAGES,
    MSG_NO_IMAGE_GENERATED,
};
use crate::error::{Result, VariatorError};
use crate::gemini::{
    ApiErrorBody, GeminiApiResponse, GeminiContent, GeminiGenerationConfig, GeminiPart,
    GeminiRequestBody,
};
use crate::imagen::{
    ImagenApiResponse, ImagenInstance, ImagenOutputOptions, ImagenParameters, ImagenRequestBody,
};
use crate::types::{FileHandle, GeneratedImage, ImageRef};
use crate::utils::{build_headers, encode_file};
use futures::future::join_all;
use reqwest::{Client, Response};
use std::future::Future;

pub struct GenerationAdapter {
    client: Client,
    api_base: String,
    api_key: String,
}

impl GenerationAdapter {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.api_base, model, method)
    }

    /// Text-to-image when `base_image` is `None`, image edit otherwise.
    /// Returns one record per prompt, in prompt order.
    pub async fn generate_image_variations(
        &self,
        base_image: Option<&FileHandle>,
        prompts: &[String],
        reference_images: &[FileHandle],
        aspect_ratio: &str,
    ) -> Vec<GeneratedImage> {
        match base_image {
            None => {
                log::info!("Generating {} image(s) from text", prompts.len());
                join_all(prompts.iter().map(|prompt| {
                    settle(prompt, self.generate_from_text(prompt, aspect_ratio))
                }))
                .await
            }
            Some(base_image) => {
                log::info!(
                    "Generating {} variation(s) of {} with {} reference image(s)",
                    prompts.len(),
                    base_image.name,
                    reference_images.len()
                );
                let image_parts = encode_image_parts(base_image, reference_images);
                join_all(prompts.iter().map(|prompt| {
                    settle(prompt, self.generate_variation(&image_parts, prompt))
                }))
                .await
            }
        }
    }

    async fn generate_from_text(&self, prompt: &str, aspect_ratio: &str) -> Result<GeneratedImage> {
        let request = RequestType::TextToImage(build_imagen_request(prompt, aspect_ratio));
        let response = self.send(&request).await?;
        let image = process_imagen_response(response).await?;
        Ok(GeneratedImage {
            prompt: prompt.to_string(),
            image,
            text: None,
        })
    }

    async fn generate_variation(
        &self,
        image_parts: &[GeminiPart],
        prompt: &str,
    ) -> Result<GeneratedImage> {
        let request = RequestType::ImageEdit(build_gemini_request(image_parts, prompt));
        let response = self.send(&request).await?;
        let (image, text) = process_gemini_response(response).await?;
        Ok(GeneratedImage {
            prompt: prompt.to_string(),
            image,
            text,
        })
    }

    async fn send(&self, request_type: &RequestType) -> Result<Response> {
        let headers = build_headers(&self.api_key)?;
        let request = match request_type {
            RequestType::TextToImage(body) => self
                .client
                .post(self.model_url(IMAGEN_MODEL, "predict"))
                .json(body),
            RequestType::ImageEdit(body) => self
                .client
                .post(self.model_url(GEMINI_IMAGE_MODEL, "generateContent"))
                .json(body),
        };
        let response = request.headers(headers).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .map(|parsed| parsed.error.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        Err(VariatorError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

async fn settle<F>(prompt: &str, generation: F) -> GeneratedImage
where
    F: Future<Output = Result<GeneratedImage>>,
{
    match generation.await {
        Ok(image) => image,
        Err(e) => {
            log::error!("Error generating image for prompt \"{}\": {}", prompt, e);
            GeneratedImage::failed(prompt, e.to_string())
        }
    }
}

/// Base image first, then each reference image in order. Encoded once per batch.
pub fn encode_image_parts(
    base_image: &FileHandle,
    reference_images: &[FileHandle],
) -> Vec<GeminiPart> {
    std::iter::once(base_image)
        .chain(reference_images)
        .map(|file| GeminiPart::InlineData {
            inline_data: encode_file(file),
        })
        .collect()
}

pub fn build_imagen_request(prompt: &str, aspect_ratio: &str) -> ImagenRequestBody {
    ImagenRequestBody {
        instances: vec![ImagenInstance {
            prompt: prompt.to_string(),
        }],
        parameters: ImagenParameters {
            sample_count: 1,
            aspect_ratio: aspect_ratio.to_string(),
            output_options: ImagenOutputOptions {
                mime_type: IMAGEN_OUTPUT_MIME.to_string(),
            },
        },
    }
}

pub fn build_gemini_request(image_parts: &[GeminiPart], prompt: &str) -> GeminiRequestBody {
    let mut parts = image_parts.to_vec();
    parts.push(GeminiPart::Text {
        text: prompt.to_string(),
    });
    GeminiRequestBody {
        contents: vec![GeminiContent { parts }],
        generation_config: GeminiGenerationConfig {
            response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
        },
    }
}

pub async fn process_imagen_response(response: Response) -> Result<ImageRef> {
    let api_response = response.json::<ImagenApiResponse>().await?;
    let prediction = api_response
        .predictions
        .into_iter()
        .find_map(|prediction| {
            let bytes = prediction.bytes_base64_encoded?;
            Some((prediction.mime_type, bytes))
        })
        .ok_or(VariatorError::EmptyResponse(MSG_NO_IMAGES))?;
    let (mime_type, bytes) = prediction;
    Ok(ImageRef::from_base64(
        mime_type.as_deref().unwrap_or(IMAGEN_OUTPUT_MIME),
        &bytes,
    ))
}

/// Scans the first candidate's parts: the last inline image wins, as does
/// the last text part.
pub async fn process_gemini_response(response: Response) -> Result<(ImageRef, Option<String>)> {
    let api_response = response.json::<GeminiApiResponse>().await?;
    let mut image = None;
    let mut text = None;

    let parts = api_response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default();
    for part in parts {
        if let Some(inline_data) = part.inline_data {
            image = Some(ImageRef::from_base64(&inline_data.mime_type, &inline_data.data));
        } else if let Some(part_text) = part.text {
            text = Some(part_text);
        }
    }

    let image = image.ok_or(VariatorError::EmptyResponse(MSG_NO_IMAGE_GENERATED))?;
    Ok((image, text))
}
