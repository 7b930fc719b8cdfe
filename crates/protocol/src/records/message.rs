/// One entry of the core client's event log.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Message {
    /// Project name, empty for client-wide messages.
    pub project: String,
    /// 1 = info, 2 = user alert, 3 = internal error.
    pub priority: i32,
    pub seqno: i32,
    /// Unix time the message was logged.
    pub timestamp: i64,
    pub body: String,
}

/// A notice from the client, a project server, or a subscribed feed.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Notice {
    pub seqno: i32,
    pub title: String,
    pub description: String,
    pub create_time: f64,
    pub arrival_time: f64,
    pub is_private: bool,
    pub project_name: String,
    pub category: String,
    pub link: String,
    /// Category was `client`.
    pub is_client_notice: bool,
    /// Category was `server`.
    pub is_server_notice: bool,
}
