use crate::keys::validate_object_name;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};

/// Region S3 treats as the default; `CreateBucket` must not send a location
/// constraint for it.
const DEFAULT_REGION: &str = "us-east-1";

/// S3 storage implementation for AWS and S3-compatible providers such as MinIO
///
/// Object reads and writes go through `object_store`; bucket-level calls go
/// through the AWS SDK because `object_store` has no bucket administration.
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    admin: aws_sdk_s3::Client,
    bucket: String,
    region: String,
    endpoint_url: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - Bucket name
    /// * `region` - Signing region (MinIO accepts "us-east-1")
    /// * `endpoint_url` - Endpoint URL, e.g. "http://localhost:9000" for MinIO
    /// * `access_key` / `secret_key` - Static credentials
    ///
    /// Requests use path-style addressing (`{endpoint}/{bucket}/{key}`).
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: String,
        access_key: String,
        secret_key: String,
    ) -> StorageResult<Self> {
        let allow_http = endpoint_url.starts_with("http://");

        let store = AmazonS3Builder::new()
            .with_bucket_name(bucket.clone())
            .with_region(region.clone())
            .with_endpoint(endpoint_url.clone())
            .with_allow_http(allow_http)
            .with_virtual_hosted_style_request(false)
            .with_access_key_id(access_key.clone())
            .with_secret_access_key(secret_key.clone())
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        let credentials = Credentials::new(access_key, secret_key, None, None, "pixscale-config");
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .endpoint_url(endpoint_url.clone())
            .credentials_provider(credentials)
            .load()
            .await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();
        let admin = aws_sdk_s3::Client::from_conf(s3_config);

        Ok(S3Storage {
            store,
            admin,
            bucket,
            region,
            endpoint_url,
        })
    }

    /// Path-style URL of an object: `{endpoint}/{bucket}/{key}`
    fn generate_url(&self, key: &str) -> String {
        let base_url = self.endpoint_url.trim_end_matches('/');
        format!("{}/{}/{}", base_url, self.bucket, key)
    }
}

/// Key `object_store` writes for `object_name`.
///
/// `Path::from` would percent-encode characters such as `#` or `%` and
/// collapse empty segments; `Path::parse` keeps the name as given, so the S3
/// key equals the object name.
fn object_path(object_name: &str) -> StorageResult<Path> {
    validate_object_name(object_name)?;
    Path::parse(object_name).map_err(|e| StorageError::InvalidKey(e.to_string()))
}

#[async_trait]
impl Storage for S3Storage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn bucket_exists(&self) -> StorageResult<bool> {
        match self.admin.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let not_found = err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false)
                    || err
                        .raw_response()
                        .map(|r| r.status().as_u16() == 404)
                        .unwrap_or(false);

                if not_found {
                    Ok(false)
                } else {
                    let message = DisplayErrorContext(&err).to_string();
                    tracing::error!(
                        error = %message,
                        bucket = %self.bucket,
                        endpoint = %self.endpoint_url,
                        "S3 bucket check failed"
                    );
                    Err(StorageError::BucketError(message))
                }
            }
        }
    }

    async fn make_bucket(&self) -> StorageResult<()> {
        let mut request = self.admin.create_bucket().bucket(&self.bucket);

        if self.region != DEFAULT_REGION {
            let configuration = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                .build();
            request = request.create_bucket_configuration(configuration);
        }

        match request.send().await {
            Ok(_) => Ok(()),
            // Another instance created it between our check and this call.
            Err(err)
                if err
                    .as_service_error()
                    .map(|e| e.is_bucket_already_owned_by_you())
                    .unwrap_or(false) =>
            {
                Ok(())
            }
            Err(err) => {
                let message = DisplayErrorContext(&err).to_string();
                tracing::error!(
                    error = %message,
                    bucket = %self.bucket,
                    region = %self.region,
                    "S3 bucket creation failed"
                );
                Err(StorageError::BucketError(message))
            }
        }
    }

    async fn put_object(
        &self,
        object_name: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        let location = object_path(object_name)?;
        let size = data.len() as u64;
        let start = std::time::Instant::now();

        let options = PutOptions {
            attributes: Attributes::from_iter([(Attribute::ContentType, content_type.to_string())]),
            ..Default::default()
        };

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(data), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %object_name,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.generate_url(object_name);

        tracing::info!(
            bucket = %self.bucket,
            key = %object_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(url)
    }

    async fn get_object(&self, object_name: &str) -> StorageResult<Vec<u8>> {
        let location = object_path(object_name)?;
        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(object_name.to_string()),
            other => StorageError::DownloadFailed(other.to_string()),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn exists(&self, object_name: &str) -> StorageResult<bool> {
        let location = object_path(object_name)?;
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
