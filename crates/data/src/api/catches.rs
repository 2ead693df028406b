use api_types::{
    catch::{CatchDto, CatchEnvelope, CatchList, CatchNew},
    insights::InsightsResponse,
};
use domain::{NetworkError, NetworkResult};
use reqwest::{
    Method,
    multipart::{Form, Part},
};

use super::{ApiClient, ErrorStyle, decode};

impl ApiClient {
    pub async fn catches(&self) -> NetworkResult<Vec<CatchDto>> {
        self.get_json::<CatchList>("user_catches")
            .await
            .map(|list| list.user_catches)
            .into()
    }

    pub async fn catch(&self, id: &str) -> NetworkResult<CatchDto> {
        self.get_json::<CatchEnvelope>(&format!("user_catches/{id}"))
            .await
            .map(|envelope| envelope.user_catch)
            .into()
    }

    /// Uploads a catch as multipart form data, the photo going in the
    /// `image` part.
    pub async fn submit_catch(
        &self,
        catch: &CatchNew,
        image: Option<Vec<u8>>,
    ) -> NetworkResult<CatchDto> {
        self.submit_catch_inner(catch, image).await.into()
    }

    async fn submit_catch_inner(
        &self,
        catch: &CatchNew,
        image: Option<Vec<u8>>,
    ) -> Result<CatchDto, NetworkError> {
        let mut form = Form::new().text("user_catch[species]", catch.species.clone());
        let optional = [
            ("user_catch[location]", catch.location.clone()),
            ("user_catch[caught_at]", catch.caught_at.clone()),
            ("user_catch[latitude]", catch.latitude.map(|v| v.to_string())),
            ("user_catch[longitude]", catch.longitude.map(|v| v.to_string())),
            ("user_catch[weight]", catch.weight.map(|v| v.to_string())),
            ("user_catch[length]", catch.length.map(|v| v.to_string())),
            ("user_catch[notes]", catch.notes.clone()),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                form = form.text(name, value);
            }
        }
        if let Some(bytes) = image {
            let part = Part::bytes(bytes)
                .file_name("catch.jpg")
                .mime_str("image/jpeg")
                .map_err(|err| NetworkError::Request(err.to_string()))?;
            form = form.part("image", part);
        }

        let path = "user_catches";
        let builder = self.request(Method::POST, path).await.multipart(form);
        let res = self.send(&Method::POST, path, builder, ErrorStyle::Raw).await?;
        decode::<CatchEnvelope>(res)
            .await
            .map(|envelope| envelope.user_catch)
    }

    pub async fn delete_catch(&self, id: &str) -> NetworkResult<()> {
        let path = format!("user_catches/{id}");
        let builder = self.request(Method::DELETE, &path).await;
        self.send(&Method::DELETE, &path, builder, ErrorStyle::Raw)
            .await
            .map(|_| ())
            .into()
    }

    pub async fn insights(&self) -> NetworkResult<String> {
        self.get_json::<InsightsResponse>("ai/insights")
            .await
            .map(|res| res.insights)
            .into()
    }
}
