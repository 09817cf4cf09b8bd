use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Payment, Student, StudentStatus};

/// Derived aggregates over the student list
///
/// Everything here is a pure function of the students passed in plus an
/// explicit `today`; nothing is cached and nothing touches storage. Dates
/// compare as whole days, so an event landing on `today` is never overdue.

/// Headline counters shown on the dashboard and embedded in exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub ativos: usize,
    pub pendentes: usize,
    pub trancados: usize,
    /// Sum of monthly fees over active students
    pub receita: f64,
    /// Active students whose monthly due date has already passed
    pub vencidas: usize,
}

/// Computes the headline counters; all zeros on an empty list
pub fn compute_stats(students: &[Student], today: NaiveDate) -> Stats {
    let ativos = students.iter().filter(|s| s.status == StudentStatus::Ativo).count();
    let pendentes = students.iter().filter(|s| s.status == StudentStatus::Pendente).count();
    let trancados = students.iter().filter(|s| s.status == StudentStatus::Trancado).count();

    let receita = students
        .iter()
        .filter(|s| s.status == StudentStatus::Ativo)
        .map(|s| s.mensalidade)
        .sum();

    let vencidas = students
        .iter()
        .filter(|s| s.status == StudentStatus::Ativo && s.vencimento_mensalidade < today)
        .count();

    Stats {
        total: students.len(),
        ativos,
        pendentes,
        trancados,
        receita,
        vencidas,
    }
}

/// Settlement state of a student's current cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatusKind {
    EmDia,
    Pendente,
    Vencido,
}

impl fmt::Display for FinancialStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FinancialStatusKind::EmDia => "em_dia",
            FinancialStatusKind::Pendente => "pendente",
            FinancialStatusKind::Vencido => "vencido",
        };
        write!(f, "{}", s)
    }
}

/// Per-student financial snapshot for the current cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatus {
    #[serde(rename = "studentId")]
    pub student_id: String,
    pub mensalidade: f64,
    #[serde(rename = "totalPagoMes")]
    pub total_pago_mes: f64,
    #[serde(rename = "valorDevido")]
    pub valor_devido: f64,
    pub status: FinancialStatusKind,
    #[serde(rename = "proximoVencimento")]
    pub proximo_vencimento: NaiveDate,
    #[serde(rename = "pagamentosMes")]
    pub pagamentos_mes: Vec<Payment>,
    #[serde(rename = "historicoCompleto")]
    pub historico_completo: Vec<Payment>,
}

/// Computes one student's financial status against `today`
///
/// Payments count toward the current cycle when their payment date shares a
/// month and year with `nextPaymentDue`. Registration advances
/// `nextPaymentDue` immediately, so a late payment settling an old cycle can
/// land in the new cycle's month; existing data files depend on the totals
/// coming out this way.
pub fn student_financial_status(student: &Student, today: NaiveDate) -> FinancialStatus {
    let due = student.next_payment_due;

    let pagamentos_mes: Vec<Payment> = student
        .payments
        .iter()
        .filter(|p| {
            p.payment_date.month() == due.month() && p.payment_date.year() == due.year()
        })
        .cloned()
        .collect();

    let total_pago_mes: f64 = pagamentos_mes.iter().map(|p| p.amount).sum();
    let valor_devido = student.mensalidade - total_pago_mes;

    let status = if valor_devido <= 0.0 {
        FinancialStatusKind::EmDia
    } else if due < today {
        FinancialStatusKind::Vencido
    } else {
        FinancialStatusKind::Pendente
    };

    FinancialStatus {
        student_id: student.id.clone(),
        mensalidade: student.mensalidade,
        total_pago_mes,
        valor_devido,
        status,
        proximo_vencimento: due,
        pagamentos_mes,
        historico_completo: student.payments.clone(),
    }
}

/// Portfolio-wide financial report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    #[serde(rename = "receitaTotal")]
    pub receita_total: f64,
    #[serde(rename = "receitaVencida")]
    pub receita_vencida: f64,
    #[serde(rename = "receitaPendente")]
    pub receita_pendente: f64,
    #[serde(rename = "totalPagamentos")]
    pub total_pagamentos: f64,
    #[serde(rename = "alunosEmDia")]
    pub alunos_em_dia: usize,
    #[serde(rename = "alunosVencidos")]
    pub alunos_vencidos: usize,
    /// Percentage of active revenue past its due date (0 when there is none)
    #[serde(rename = "taxaInadimplencia")]
    pub taxa_inadimplencia: f64,
    #[serde(rename = "taxaPagamento")]
    pub taxa_pagamento: f64,
}

/// Computes the portfolio report against `today`
///
/// Active students contribute their fee to total revenue, split into overdue
/// and pending by `nextPaymentDue`. Ledger sums and the up-to-date count
/// consider every student regardless of enrollment status. Rates are defined
/// as 0% when total revenue is zero.
pub fn compute_financial_report(students: &[Student], today: NaiveDate) -> FinancialReport {
    let mut receita_total = 0.0;
    let mut receita_vencida = 0.0;
    let mut receita_pendente = 0.0;
    let mut total_pagamentos = 0.0;
    let mut alunos_em_dia = 0;
    let mut alunos_vencidos = 0;

    for student in students {
        if student.status == StudentStatus::Ativo {
            receita_total += student.mensalidade;

            if student.next_payment_due < today {
                receita_vencida += student.mensalidade;
                alunos_vencidos += 1;
            } else {
                receita_pendente += student.mensalidade;
            }
        }

        total_pagamentos += student.payments.iter().map(|p| p.amount).sum::<f64>();

        if student_financial_status(student, today).status == FinancialStatusKind::EmDia {
            alunos_em_dia += 1;
        }
    }

    let taxa_inadimplencia = if receita_total > 0.0 {
        receita_vencida / receita_total * 100.0
    } else {
        0.0
    };
    let taxa_pagamento = if receita_total > 0.0 {
        total_pagamentos / receita_total * 100.0
    } else {
        0.0
    };

    FinancialReport {
        receita_total,
        receita_vencida,
        receita_pendente,
        total_pagamentos,
        alunos_em_dia,
        alunos_vencidos,
        taxa_inadimplencia,
        taxa_pagamento,
    }
}
