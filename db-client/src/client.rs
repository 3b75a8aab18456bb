//! 数据库查看服务 HTTP 客户端

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use common::config::AppConfig;
use common::errors::{AppError, AppResult};
use common::models::{ColumnList, ColumnSummary, DatabaseList, TableList, UploadFile};
use common::response::ErrorBody;
use common::utils::IdGenerator;
use common::REQUEST_ID_HEADER;

use crate::api::DatabaseApi;

/// REST 资源根路径
pub const RESOURCE_PATH: &str = "database/";

/// 上传时使用的表单字段名
pub const UPLOAD_FIELD: &str = "db";

/// 基于 reqwest 的数据访问客户端
#[derive(Clone)]
pub struct HttpDatabaseClient {
    resource_url: Url,
    http_client: reqwest::Client,
}

impl HttpDatabaseClient {
    /// 创建新的客户端实例
    ///
    /// `base_url` 为服务地址（如 `http://127.0.0.1:5000`），资源位于其下的 `/database/`。
    pub fn new(base_url: &str, http_client: reqwest::Client) -> AppResult<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let resource_url = Url::parse(&base)
            .and_then(|url| url.join(RESOURCE_PATH))
            .map_err(|e| AppError::Config(format!("invalid base url {base_url:?}: {e}")))?;
        if resource_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("invalid base url {base_url:?}")));
        }

        Ok(Self {
            resource_url,
            http_client,
        })
    }

    /// 根据配置创建客户端
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(&config.base_url, reqwest::Client::new())
    }

    /// 拼接资源地址：每个标识符一段路径，末尾保留斜杠
    ///
    /// `.` 与 `..` 会被 URL 规范化吞掉或上跳，直接拒绝。
    pub fn url_for(&self, segments: &[&str]) -> AppResult<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(AppError::Validation(format!("invalid identifier {bad:?}")));
        }
        let mut url = self.resource_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| AppError::Config(format!("invalid base url {}", self.resource_url)))?;
            path.pop_if_empty();
            path.extend(segments);
            path.push("");
        }
        Ok(url)
    }

    /// 发送请求并解析 JSON 响应
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> AppResult<T> {
        let request_id = IdGenerator::request_id();
        debug!(request_id = %request_id, url = %url, "发送请求");

        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("cannot reach {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let err = ErrorBody::into_error(
                status.as_u16(),
                &raw,
                status.canonical_reason().unwrap_or("request failed"),
            );
            warn!(request_id = %request_id, status = status.as_u16(), url = %url, "服务返回错误");
            return Err(err);
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|e| AppError::InvalidResponse(format!("{url}: {e}")))?;
        debug!(request_id = %request_id, status = status.as_u16(), "请求完成");
        Ok(body)
    }
}

#[async_trait]
impl DatabaseApi for HttpDatabaseClient {
    async fn list_databases(&self) -> AppResult<Vec<String>> {
        let url = self.url_for(&[])?;
        let body: DatabaseList = self.send(self.http_client.get(url.clone()), &url).await?;
        Ok(body.into())
    }

    async fn upload_database(&self, file: UploadFile) -> AppResult<Vec<String>> {
        let url = self.url_for(&[])?;
        debug!(file = %file.file_name, size = file.len(), "上传数据库文件");

        let part = Part::bytes(file.bytes).file_name(file.file_name);
        let form = Form::new().part(UPLOAD_FIELD, part);
        let body: DatabaseList = self
            .send(self.http_client.post(url.clone()).multipart(form), &url)
            .await?;
        Ok(body.into())
    }

    async fn list_tables(&self, database: &str) -> AppResult<Vec<String>> {
        let url = self.url_for(&[database])?;
        let body: TableList = self.send(self.http_client.get(url.clone()), &url).await?;
        Ok(body.into())
    }

    async fn list_columns(&self, database: &str, table: &str) -> AppResult<Vec<String>> {
        let url = self.url_for(&[database, table])?;
        let body: ColumnList = self.send(self.http_client.get(url.clone()), &url).await?;
        Ok(body.into())
    }

    async fn column_data(
        &self,
        database: &str,
        table: &str,
        column: &str,
    ) -> AppResult<ColumnSummary> {
        let url = self.url_for(&[database, table, column])?;
        self.send(self.http_client.get(url.clone()), &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpDatabaseClient {
        HttpDatabaseClient::new(base, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn test_resource_root() {
        let c = client("http://127.0.0.1:5000");
        assert_eq!(c.url_for(&[]).unwrap().as_str(), "http://127.0.0.1:5000/database/");
    }

    #[test]
    fn test_nested_paths_keep_trailing_slash() {
        let c = client("http://127.0.0.1:5000/");
        assert_eq!(
            c.url_for(&["sales.db"]).unwrap().as_str(),
            "http://127.0.0.1:5000/database/sales.db/"
        );
        assert_eq!(
            c.url_for(&["sales.db", "orders", "amount"]).unwrap().as_str(),
            "http://127.0.0.1:5000/database/sales.db/orders/amount/"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let c = client("http://example.com/viewer");
        assert_eq!(
            c.url_for(&["a.db"]).unwrap().as_str(),
            "http://example.com/viewer/database/a.db/"
        );
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let c = client("http://localhost");
        let url = c.url_for(&["my db.db", "a/b"]).unwrap();
        assert_eq!(url.path(), "/database/my%20db.db/a%2Fb/");
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        let c = client("http://localhost");
        for bad in [".", "..", ""] {
            let err = c.url_for(&["sales.db", bad]).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{bad:?}: {err:?}");
        }
        // dots inside a name are fine
        assert_eq!(c.url_for(&["..db"]).unwrap().path(), "/database/..db/");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpDatabaseClient::new("not a url", reqwest::Client::new())
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }
}
