use crate::models::{
    ClassSchedule, Payment, PaymentMethod, PaymentStatus, Student, StudentStatus, Task, TaskStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use proptest::prelude::*;

/// Generates an arbitrary date within 2020-01-01 to 2030-01-01
pub fn arb_wire_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3653).prop_map(|days| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(days)
    })
}

/// Generates an optional arbitrary date
pub fn arb_optional_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop_oneof![Just(None), arb_wire_date().prop_map(Some)]
}

/// Generates an arbitrary UTC timestamp within 2020-01-01 to 2030-01-01
pub fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (1_577_836_800i64..1_893_456_000i64)
        .prop_map(|ts| DateTime::from_timestamp(ts, 0).unwrap())
}

/// Generates a money amount in [0, 5000] with two decimals
///
/// Uses integer-then-divide so exact boundary values are reachable without
/// floating point noise.
pub fn arb_money() -> impl Strategy<Value = f64> {
    (0u32..=500_000u32).prop_map(|cents| cents as f64 / 100.0)
}

/// Generates an arbitrary student status
pub fn arb_student_status() -> impl Strategy<Value = StudentStatus> {
    prop_oneof![
        Just(StudentStatus::Ativo),
        Just(StudentStatus::Pendente),
        Just(StudentStatus::Trancado),
    ]
}

/// Generates an arbitrary payment method
pub fn arb_payment_method() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::Dinheiro),
        Just(PaymentMethod::Pix),
        Just(PaymentMethod::Cartao),
        Just(PaymentMethod::Transferencia),
    ]
}

/// Generates strings with unicode, quotes, and control characters mixed in
pub fn arb_messy_string() -> impl Strategy<Value = String> {
    "\\PC{0,40}"
}

/// Generates an arbitrary payment for the given student id space
pub fn arb_payment() -> impl Strategy<Value = Payment> {
    (
        "[0-9]{4}",
        arb_money(),
        arb_wire_date(),
        arb_wire_date(),
        arb_payment_method(),
        arb_timestamp(),
    )
        .prop_map(|(suffix, amount, payment_date, due_date, payment_method, created_at)| {
            Payment {
                id: format!("PAY-1700000000000-test{}", suffix),
                student_id: format!("ALU-{}", suffix),
                amount,
                payment_date,
                due_date,
                payment_method,
                status: PaymentStatus::Pago,
                observation: None,
                receipt: None,
                created_at,
            }
        })
}

/// Generates an arbitrary class slot
pub fn arb_class_slot() -> impl Strategy<Value = ClassSchedule> {
    ("[0-9]{4}", 0u8..=6, 8u32..20, 15u32..=240, any::<bool>(), arb_timestamp()).prop_map(
        |(suffix, day_of_week, hour, duration, is_active, created_at)| ClassSchedule {
            id: format!("SCH-1700000000000-test{}", suffix),
            student_id: format!("ALU-{}", suffix),
            day_of_week,
            time: format!("{:02}:00", hour),
            duration,
            subject: "Desenho".to_string(),
            is_active,
            created_at,
        },
    )
}

/// Generates an arbitrary task
pub fn arb_task() -> impl Strategy<Value = Task> {
    ("[0-9]{4}", arb_wire_date(), arb_messy_string(), arb_timestamp()).prop_map(
        |(suffix, date, title, created_at)| Task {
            id: format!("TASK-1700000000000-test{}", suffix),
            student_id: format!("ALU-{}", suffix),
            date,
            title,
            description: String::new(),
            status: TaskStatus::Pendente,
            art_image: None,
            notes: None,
            created_at,
            updated_at: created_at,
        },
    )
}

/// Generates a fully populated student with a few owned records
pub fn arb_student() -> impl Strategy<Value = Student> {
    (
        1u32..9999,
        arb_messy_string(),
        arb_student_status(),
        arb_money(),
        arb_optional_date(),
        arb_wire_date(),
        arb_optional_date(),
        arb_wire_date(),
        prop::collection::vec(arb_payment(), 0..3),
        prop::collection::vec(arb_class_slot(), 0..3),
        prop::collection::vec(arb_task(), 0..3),
    )
        .prop_map(
            |(
                seq,
                nome,
                status,
                mensalidade,
                nasc,
                vencimento_mensalidade,
                last_payment_date,
                next_payment_due,
                payments,
                class_schedule,
                tasks,
            )| {
                Student {
                    id: crate::models::student_id_from_seq(seq),
                    nome,
                    status,
                    mensalidade,
                    cidade: "São Paulo".to_string(),
                    email: "aluno@email.com".to_string(),
                    telefone: "(11) 90000-0000".to_string(),
                    nasc,
                    vencimento_mensalidade,
                    payments,
                    last_payment_date,
                    next_payment_due,
                    class_schedule,
                    tasks,
                }
            },
        )
}

/// Generates a vector of students with the given size range
pub fn arb_students(size: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Student>> {
    prop::collection::vec(arb_student(), size)
}
