/// Capabilities in the catalog moderation service
///
/// This is a simplified model focused on admin operations since every
/// review surface (queues, single decisions, bulk decisions) is admin-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCapability {
    /// Approve or reject individual submissions
    ReviewSubmissions,

    /// Resolve many submissions in one request
    BulkReviewSubmissions,

    /// Read the pending and post-moderation queues
    ViewReviewQueues,

    /// Full admin access to all operations
    FullAdmin,
}

impl AdminCapability {
    /// Check if this capability requires admin access
    pub fn requires_admin(&self) -> bool {
        // All capabilities in this system require admin access
        true
    }
}
