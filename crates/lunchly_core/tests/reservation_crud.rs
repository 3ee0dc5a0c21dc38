use chrono::{NaiveDate, NaiveDateTime};
use lunchly_core::db::open_db_in_memory;
use lunchly_core::{
    Customer, CustomerId, CustomerRepository, NotFoundError, RepoError, Reservation,
    ReservationRepository, ReservationService, ReservationValidationError, ServiceError,
    SqliteCustomerRepository, SqliteReservationRepository,
};
use rusqlite::Connection;

fn dinner(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn seed_customer(conn: &Connection, first_name: &str) -> CustomerId {
    let repo = SqliteCustomerRepository::try_new(conn).unwrap();
    repo.insert_customer(&Customer::new(first_name, "Guest", None, None))
        .unwrap()
}

fn service(conn: &Connection) -> ReservationService<SqliteReservationRepository<'_>> {
    ReservationService::new(SqliteReservationRepository::try_new(conn).unwrap())
}

#[test]
fn save_assigns_id_and_roundtrips_fields() {
    let conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&conn, "Jane");
    let service = service(&conn);

    let mut reservation =
        Reservation::new(customer_id, 4, dinner(1, 19, 30), Some("window table")).unwrap();
    assert!(!reservation.is_persisted());
    let id = service.save(&mut reservation).unwrap();
    assert_eq!(reservation.id(), Some(id));

    let loaded = service.get_by_id(id).unwrap();
    assert_eq!(loaded, reservation);
    assert_eq!(loaded.customer_id(), customer_id);
    assert_eq!(loaded.num_guests(), 4);
    assert_eq!(loaded.start_at(), dinner(1, 19, 30));
    assert_eq!(loaded.notes(), "window table");
}

#[test]
fn start_at_roundtrips_without_precision_loss() {
    let conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&conn, "Jane");
    let service = service(&conn);

    let precise = NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_nano_opt(18, 45, 12, 123_456_789)
        .unwrap();
    let created = service
        .create_reservation(customer_id, 2, Some(precise), None)
        .unwrap();

    let loaded = service.get_by_id(created.id().unwrap()).unwrap();
    assert_eq!(loaded.start_at(), precise);
}

#[test]
fn create_reservation_without_start_at_books_now() {
    let conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&conn, "Jane");
    let service = service(&conn);

    let before = chrono::Local::now().naive_local();
    let created = service
        .create_reservation(customer_id, 2, None, Some(""))
        .unwrap();
    let after = chrono::Local::now().naive_local();

    assert!(created.start_at() >= before && created.start_at() <= after);
    assert_eq!(created.notes(), "");
}

#[test]
fn create_reservation_validates_before_touching_store() {
    let conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&conn, "Jane");
    let service = service(&conn);

    let err = service
        .create_reservation(customer_id, 0, Some(dinner(1, 19, 0)), None)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ReservationValidationError::NumGuestsTooSmall(0))
    ));
    assert_eq!(err.status_code(), 400);
    assert!(service
        .get_reservations_for_customer(customer_id)
        .unwrap()
        .is_empty());
}

#[test]
fn reservation_for_unknown_customer_is_a_store_error() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .create_reservation(999, 2, Some(dinner(1, 19, 0)), None)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Store(RepoError::Db(_))));
    assert_eq!(err.status_code(), 500);
}

#[test]
fn get_reservations_for_customer_returns_only_that_customer_in_start_order() {
    let conn = open_db_in_memory().unwrap();
    let jane = seed_customer(&conn, "Jane");
    let john = seed_customer(&conn, "John");
    let service = service(&conn);

    service
        .create_reservation(jane, 2, Some(dinner(5, 19, 0)), None)
        .unwrap();
    service
        .create_reservation(john, 3, Some(dinner(2, 19, 0)), None)
        .unwrap();
    service
        .create_reservation(jane, 6, Some(dinner(3, 18, 0)), None)
        .unwrap();

    let found = service.get_reservations_for_customer(jane).unwrap();
    let guests: Vec<i64> = found.iter().map(Reservation::num_guests).collect();
    assert_eq!(guests, [6, 2]);
    assert!(found.iter().all(|r| r.customer_id() == jane));
}

#[test]
fn get_by_id_missing_returns_not_found_with_404() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.get_by_id(7).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound(NotFoundError::Reservation(7))
    ));
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_string(), "No such reservation: 7");
}

#[test]
fn delete_removes_row_and_is_safe_to_repeat() {
    let conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&conn, "Jane");
    let service = service(&conn);

    let created = service
        .create_reservation(customer_id, 2, Some(dinner(1, 19, 0)), None)
        .unwrap();
    let id = created.id().unwrap();
    let stale_copy = service.get_by_id(id).unwrap();

    service.delete(created).unwrap();
    assert!(matches!(
        service.get_by_id(id),
        Err(ServiceError::NotFound(NotFoundError::Reservation(missing))) if missing == id
    ));

    service.delete(stale_copy).unwrap();
    let transient = Reservation::new(customer_id, 2, dinner(1, 19, 0), None).unwrap();
    service.delete(transient).unwrap();
}

#[test]
fn saving_a_reservation_whose_row_was_deleted_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&conn, "Jane");
    let service = service(&conn);

    let created = service
        .create_reservation(customer_id, 2, Some(dinner(1, 19, 0)), None)
        .unwrap();
    let id = created.id().unwrap();
    let mut stale_copy = service.get_by_id(id).unwrap();
    service.delete(created).unwrap();

    let err = service.save(&mut stale_copy).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound(NotFoundError::Reservation(missing)) if missing == id
    ));
}

#[test]
fn edit_reservation_updates_and_persists_all_three_fields() {
    let conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&conn, "Jane");
    let service = service(&conn);

    let mut reservation = service
        .create_reservation(customer_id, 2, Some(dinner(1, 19, 0)), Some("anniversary"))
        .unwrap();
    service
        .edit_reservation(&mut reservation, 5, dinner(8, 20, 15), Some("moved a week"))
        .unwrap();

    let loaded = service.get_by_id(reservation.id().unwrap()).unwrap();
    assert_eq!(loaded.num_guests(), 5);
    assert_eq!(loaded.start_at(), dinner(8, 20, 15));
    assert_eq!(loaded.notes(), "moved a week");
    assert_eq!(loaded, reservation);
}

#[test]
fn edit_reservation_with_invalid_guests_leaves_entity_and_row_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&conn, "Jane");
    let service = service(&conn);

    let mut reservation = service
        .create_reservation(customer_id, 2, Some(dinner(1, 19, 0)), Some("anniversary"))
        .unwrap();
    let before = reservation.clone();

    let err = service
        .edit_reservation(&mut reservation, 0, dinner(8, 20, 15), Some("moved"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(reservation, before);

    let loaded = service.get_by_id(reservation.id().unwrap()).unwrap();
    assert_eq!(loaded, before);
}

#[test]
fn corrupted_rows_surface_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let customer_id = seed_customer(&conn, "Jane");
    conn.execute(
        "INSERT INTO reservations (customer_id, num_guests, start_at, notes)
         VALUES (?1, 2, 'not a timestamp', '');",
        [customer_id],
    )
    .unwrap();
    let id = conn.last_insert_rowid();

    let repo = SqliteReservationRepository::try_new(&conn).unwrap();
    assert!(matches!(
        repo.get_reservation(id),
        Err(RepoError::InvalidData(_))
    ));
}
