//! Typed accessor trait for application settings
//!
//! Components that depend on the application settings take this trait instead
//! of reading raw keys, so the resolved value is passed explicitly.

/// Read-only view of the application settings
pub trait AppSettingsApi: Send + Sync {
    /// HTTP server port (`server.port`)
    fn server_port(&self) -> i64;

    /// JDBC-style database URL (`spring.datasource.url`)
    fn database_url(&self) -> &str;

    /// Database username (`spring.datasource.username`)
    fn database_username(&self) -> &str;

    /// Whether JVM metrics binders are enabled
    fn is_jvm_metrics_enabled(&self) -> bool;

    /// Whether Tomcat metrics binders are enabled
    fn is_tomcat_metrics_enabled(&self) -> bool;
}
