use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, SimpleObject};

use crate::modules::attendance::core::partition::PartitionId;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::core::person_id::PersonId;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlAttendanceRecord {
    pub attendance_id: String,
    pub person_id: String,
    pub display_name: String,
    pub category: String,
    pub program: String,
    pub date: String,
    pub check_in_time: String,
    pub check_out_time: Option<String>,
}

impl From<AttendanceRecord> for GqlAttendanceRecord {
    fn from(r: AttendanceRecord) -> Self {
        Self {
            attendance_id: r.attendance_id.to_string(),
            person_id: r.person_id.to_string(),
            display_name: r.display_name,
            category: r.category.to_string(),
            program: r.program,
            date: r.date.format("%Y-%m-%d").to_string(),
            check_in_time: r.check_in_time.format("%H:%M:%S").to_string(),
            check_out_time: r.check_out_time.map(|t| t.format("%H:%M:%S").to_string()),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlPartitionListing {
    pub partition_id: String,
    pub total: usize,
    pub records: Vec<GqlAttendanceRecord>,
}

#[derive(SimpleObject, Clone)]
pub struct GqlPersonRecord {
    pub partition_id: String,
    pub record: GqlAttendanceRecord,
}

fn bad_input(code: &'static str, message: impl ToString) -> async_graphql::Error {
    async_graphql::Error::new(message.to_string()).extend_with(|_, ext| ext.set("code", code))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn attendance_by_partition(
        &self,
        context: &Context<'_>,
        partition_id: Option<String>,
    ) -> GqlResult<GqlPartitionListing> {
        let state = context.data_unchecked::<AppState>();
        let partition_id = partition_id
            .map(|raw| PartitionId::parse(raw.trim()))
            .transpose()
            .map_err(|e| bad_input("invalid_partition_id", e))?;

        let listing = state
            .list_handler
            .by_partition(partition_id)
            .await
            .map_err(|e| bad_input(e.kind(), &e))?;

        Ok(GqlPartitionListing {
            partition_id: listing.partition_id.to_string(),
            total: listing.records.len(),
            records: listing.records.into_iter().map(Into::into).collect(),
        })
    }

    async fn attendance_by_person(
        &self,
        context: &Context<'_>,
        person_id: String,
    ) -> GqlResult<Vec<GqlPersonRecord>> {
        let state = context.data_unchecked::<AppState>();
        let person_id =
            PersonId::parse(&person_id).map_err(|e| bad_input("invalid_person_id", e))?;

        let listing = state
            .list_handler
            .by_person(person_id)
            .await
            .map_err(|e| bad_input(e.kind(), &e))?;

        Ok(listing
            .records
            .into_iter()
            .map(|(partition_id, record)| GqlPersonRecord {
                partition_id: partition_id.to_string(),
                record: record.into(),
            })
            .collect())
    }
}
