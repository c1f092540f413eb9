use crate::config::NameMatch;
use crate::entities::{drugs, prelude::*};
use crate::models::DrugRecord;
use anyhow::Result;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

pub struct DrugRepository {
    conn: DatabaseConnection,
}

impl DrugRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find(&self, name: &str, policy: NameMatch) -> Result<Option<DrugRecord>> {
        match policy {
            NameMatch::Exact => self.find_exact(name).await,
            NameMatch::Contains => self.find_containing(name).await,
        }
    }

    pub async fn find_exact(&self, name: &str) -> Result<Option<DrugRecord>> {
        let row = Drugs::find()
            .filter(drugs::Column::Name.eq(name))
            .one(&self.conn)
            .await?;

        Ok(row.map(DrugRecord::from))
    }

    /// Case-sensitive substring match. `LIKE` is avoided because SQLite folds
    /// ASCII case and treats `%`/`_` in the needle as wildcards.
    pub async fn find_containing(&self, name: &str) -> Result<Option<DrugRecord>> {
        let rows = Drugs::find()
            .filter(Expr::cust_with_values("instr(\"name\", ?) > 0", [name]))
            .all(&self.conn)
            .await?;

        let best = rows.into_iter().min_by(|a, b| {
            a.name
                .chars()
                .count()
                .cmp(&b.name.chars().count())
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(best.map(DrugRecord::from))
    }

    /// Insert-or-replace keyed on `name`. Every column is overwritten.
    pub async fn upsert(&self, record: &DrugRecord) -> Result<()> {
        let active_model = drugs::ActiveModel {
            name: Set(record.name.clone()),
            generic_name: Set(record.generic_name.clone()),
            brand_name: Set(record.brand_name.clone()),
            ndc: Set(record.ndc.clone()),
            manufacturer: Set(record.manufacturer.clone()),
            created_at: Set(record.created_at.clone()),
            ..Default::default()
        };

        Drugs::insert(active_model)
            .on_conflict(
                OnConflict::column(drugs::Column::Name)
                    .update_columns([
                        drugs::Column::GenericName,
                        drugs::Column::BrandName,
                        drugs::Column::Ndc,
                        drugs::Column::Manufacturer,
                        drugs::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }
}
