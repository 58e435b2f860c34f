/// How a field is edited and checked on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// `YYYY-MM-DD`, edited with the date picker
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Text,
    }
}

const fn date(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Date,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Procedures {
    pub insert: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// Configuration record for one table: what the tab shows and which stored
/// procedures its buttons call.
///
/// `fields` is in procedure argument order and starts with the ID field.
/// Inserts send every field except the ID; updates send all of them;
/// deletes send only the ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityConfig {
    pub tab: &'static str,
    pub fields: &'static [FieldSpec],
    pub id_field: &'static str,
    pub procedures: Procedures,
}

impl EntityConfig {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn insert_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .map(|f| f.name)
            .filter(|name| *name != self.id_field)
            .collect()
    }

    pub fn update_fields(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

pub const GENRES: EntityConfig = EntityConfig {
    tab: "Genres",
    fields: &[text("GenreID"), text("GenreName"), text("Description")],
    id_field: "GenreID",
    procedures: Procedures {
        insert: "sp_InsertGenre",
        update: "sp_UpdateGenre",
        delete: "sp_DeleteGenre",
    },
};

pub const CUSTOMERS: EntityConfig = EntityConfig {
    tab: "Customers",
    fields: &[
        text("CustomerID"),
        text("FullName"),
        text("Email"),
        text("City"),
        text("Country"),
    ],
    id_field: "CustomerID",
    procedures: Procedures {
        insert: "sp_InsertCustomer",
        update: "sp_UpdateCustomer",
        delete: "sp_DeleteCustomer",
    },
};

pub const GAMES: EntityConfig = EntityConfig {
    tab: "Games",
    fields: &[
        text("GameID"),
        text("GameTitle"),
        text("GenreID"),
        text("Platform"),
        text("Price"),
    ],
    id_field: "GameID",
    procedures: Procedures {
        insert: "sp_InsertGame",
        update: "sp_UpdateGame",
        delete: "sp_DeleteGame",
    },
};

pub const SALES: EntityConfig = EntityConfig {
    tab: "Sales",
    fields: &[text("SaleID"), text("CustomerID"), date("SaleDate")],
    id_field: "SaleID",
    procedures: Procedures {
        insert: "sp_InsertSale",
        update: "sp_UpdateSale",
        delete: "sp_DeleteSale",
    },
};

pub const SALE_DETAILS: EntityConfig = EntityConfig {
    tab: "SaleDetails",
    fields: &[
        text("SaleDetailID"),
        text("SaleID"),
        text("GameID"),
        text("Quantity"),
    ],
    id_field: "SaleDetailID",
    procedures: Procedures {
        insert: "sp_InsertSaleDetail",
        update: "sp_UpdateSaleDetail",
        delete: "sp_DeleteSaleDetail",
    },
};

/// Tab order.
pub const ENTITIES: [&EntityConfig; 5] = [&GENRES, &CUSTOMERS, &GAMES, &SALES, &SALE_DETAILS];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entity_starts_with_its_id() {
        for entity in ENTITIES {
            assert_eq!(entity.fields[0].name, entity.id_field, "{}", entity.tab);
        }
    }

    #[test]
    fn insert_omits_id_and_update_keeps_order() {
        assert_eq!(GENRES.insert_fields(), vec!["GenreName", "Description"]);
        assert_eq!(
            GAMES.update_fields(),
            vec!["GameID", "GameTitle", "GenreID", "Platform", "Price"]
        );
        assert_eq!(SALES.insert_fields(), vec!["CustomerID", "SaleDate"]);
    }

    #[test]
    fn procedures_follow_naming_convention() {
        let names = [
            ("Genre", &GENRES),
            ("Customer", &CUSTOMERS),
            ("Game", &GAMES),
            ("Sale", &SALES),
            ("SaleDetail", &SALE_DETAILS),
        ];
        for (entity, config) in names {
            assert_eq!(config.procedures.insert, format!("sp_Insert{entity}"));
            assert_eq!(config.procedures.update, format!("sp_Update{entity}"));
            assert_eq!(config.procedures.delete, format!("sp_Delete{entity}"));
        }
    }

    #[test]
    fn only_sale_date_is_date_typed() {
        let dates: Vec<_> = ENTITIES
            .iter()
            .flat_map(|e| e.fields.iter())
            .filter(|f| f.kind == FieldKind::Date)
            .map(|f| f.name)
            .collect();
        assert_eq!(dates, vec!["SaleDate"]);
        assert_eq!(SALES.field("SaleDate").map(|f| f.kind), Some(FieldKind::Date));
    }
}
