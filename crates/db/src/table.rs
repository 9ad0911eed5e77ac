use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Habit {
    Table,
    Id,
    Name,
    Icon,
    Color,
    History,
    Archived,
    CreatedAt,
}
