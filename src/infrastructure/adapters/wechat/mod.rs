//! WeChat Adapters - 公众号素材接口实现

mod fake_client;
mod http_client;

pub use fake_client::FakeWeChatClient;
pub use http_client::{WeChatHttpClient, WeChatHttpClientConfig};
