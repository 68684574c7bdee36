use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, SimpleObject};

use crate::modules::attendance::use_cases::list_attendance::inbound::graphql::GqlAttendanceRecord;
use crate::modules::attendance::use_cases::register_attendance::command::RegisterAttendance;
use crate::modules::attendance::use_cases::register_attendance::handler::{
    RegistrationKind, RegistrationOutcome,
};
use crate::shared::core::person_id::PersonId;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlRegistration {
    pub status: String,
    pub partition_id: String,
    pub record: GqlAttendanceRecord,
    pub warning: Option<String>,
}

impl From<RegistrationOutcome> for GqlRegistration {
    fn from(outcome: RegistrationOutcome) -> Self {
        let status = match outcome.kind {
            RegistrationKind::CheckIn => "check-in",
            RegistrationKind::CheckOut => "check-out",
        };
        Self {
            status: status.to_string(),
            partition_id: outcome.partition_id.to_string(),
            record: outcome.record.into(),
            warning: outcome.export_warning,
        }
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn register_attendance(
        &self,
        context: &Context<'_>,
        person_id: String,
    ) -> GqlResult<GqlRegistration> {
        let state = context.data_unchecked::<AppState>();
        let person_id = PersonId::parse(&person_id).map_err(|e| {
            async_graphql::Error::new(e.to_string())
                .extend_with(|_, ext| ext.set("code", "invalid_person_id"))
        })?;

        let outcome = state
            .register_handler
            .handle(RegisterAttendance::new(person_id))
            .await
            .map_err(|e| {
                async_graphql::Error::new(e.to_string())
                    .extend_with(|_, ext| ext.set("code", e.kind()))
            })?;

        Ok(outcome.into())
    }
}
