use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Days, NaiveDate, TimeZone, Utc};
use usra_auth::{
    compute_all, compute_effective, DateInput, InMemoryRoleCatalog, NewRoleAssignment,
    RoleAssignment, RoleDefinition, RoleKey,
};
use usra_calendar::{gregorian_to_hijri, hijri_to_gregorian, parse_date_text};
use usra_core::{AssignmentId, RoleId, UserId};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn catalog(roles: usize) -> (InMemoryRoleCatalog, Vec<RoleDefinition>) {
    let defs: Vec<RoleDefinition> = (0..roles)
        .map(|i| {
            RoleDefinition::new(RoleId::new(), RoleKey::new(format!("role_{i}")), "دور")
                .with_priority(i as i32)
                .with_permissions((0..8).map(|p| format!("perm_{}", (i * 3 + p) % 40)))
        })
        .collect();
    (defs.iter().cloned().collect(), defs)
}

/// `count` assignments spread over `users` users with staggered date ranges.
fn history(count: usize, users: &[UserId], roles: &[RoleDefinition], cat: &InMemoryRoleCatalog) -> Vec<RoleAssignment> {
    let assigned_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let start = base_date().checked_add_days(Days::new((i * 37 % 2000) as u64)).unwrap();
            let end = (i % 3 != 0).then(|| start.checked_add_days(Days::new(365)).unwrap());
            let mut a = RoleAssignment::create(
                NewRoleAssignment {
                    id: AssignmentId::new(),
                    user_id: users[i % users.len()],
                    role_id: roles[i % roles.len()].id,
                    start_date: DateInput::gregorian(start),
                    end_date: end.map(DateInput::gregorian),
                    notes: None,
                    assigned_by: users[0],
                    assigned_at,
                },
                cat,
            )
            .unwrap();
            if i % 11 == 0 {
                a.revoke(assigned_at).unwrap();
            }
            a
        })
        .collect()
}

fn bench_calendar(c: &mut Criterion) {
    let mut group = c.benchmark_group("calendar");
    let greg = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    group.bench_function("gregorian_to_hijri", |b| {
        b.iter(|| gregorian_to_hijri(black_box(greg)).unwrap())
    });
    group.bench_function("hijri_to_gregorian", |b| {
        b.iter(|| hijri_to_gregorian(black_box(1446), black_box(9), black_box(15)).unwrap())
    });
    group.bench_function("parse_named", |b| {
        b.iter(|| parse_date_text(black_box("15 رمضان 1446")).unwrap())
    });
    group.bench_function("parse_numeric", |b| {
        b.iter(|| parse_date_text(black_box("15/9/1446")).unwrap())
    });
    group.finish();
}

fn bench_entitlements(c: &mut Criterion) {
    let mut group = c.benchmark_group("entitlements");
    let (cat, roles) = catalog(20);
    let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    for count in [10usize, 100, 1_000] {
        let user = UserId::new();
        let assignments = history(count, &[user], &roles, &cat);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("compute_effective", count),
            &assignments,
            |b, assignments| b.iter(|| compute_effective(user, black_box(assignments), &cat, as_of)),
        );
    }

    let users: Vec<UserId> = (0..200).map(|_| UserId::new()).collect();
    let assignments = history(5_000, &users, &roles, &cat);
    group.throughput(Throughput::Elements(assignments.len() as u64));
    group.bench_function("compute_all_200_users", |b| {
        b.iter(|| compute_all(black_box(&assignments), &cat, as_of))
    });

    group.finish();
}

criterion_group!(benches, bench_calendar, bench_entitlements);
criterion_main!(benches);
