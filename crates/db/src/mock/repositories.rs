use async_trait::async_trait;
use eyre::Result;
use mockall::mock;
use shiftswap_core::{
    dates::IsoDate,
    models::{
        notification::Notification,
        principal::Role,
        schedule::ScheduleRow,
        swap::{SwapRequest, SwapStatus},
    },
    store::ShiftStore,
};
use uuid::Uuid;

// Mock store for exercising the services against scripted backend failures
mock! {
    pub Store {}

    #[async_trait]
    impl ShiftStore for Store {
        async fn replace_week(&self, week: &IsoDate, rows: &[ScheduleRow]) -> Result<()>;

        async fn list_weeks(&self) -> Result<Vec<IsoDate>>;

        async fn get_week_rows(&self, week: &IsoDate) -> Result<Vec<ScheduleRow>>;

        async fn list_swaps(&self) -> Result<Vec<SwapRequest>>;

        async fn get_swap(&self, id: Uuid) -> Result<Option<SwapRequest>>;

        async fn insert_swap(&self, swap: &SwapRequest) -> Result<()>;

        async fn update_swap_status(
            &self,
            id: Uuid,
            expected: SwapStatus,
            next: SwapStatus,
        ) -> Result<Option<SwapRequest>>;

        async fn insert_notification(&self, notification: &Notification) -> Result<()>;

        async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;

        async fn role_for_principal(&self, principal_id: &str) -> Result<Option<Role>>;

        async fn principal_for_employee(&self, employee_code: &str) -> Result<Option<String>>;
    }
}
