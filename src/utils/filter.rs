use crate::models::OsdOp;
use crate::utils::constants::DEFAULT_INFER_THRESHOLD_US;

// 필터링 옵션을 저장할 구조체 정의
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub osd: Option<u32>, // 분석할 단일 OSD (None이면 전체)
    pub min_lat: u64,     // 최소 최종 레이턴시 (µs), 0이면 비활성
}

impl FilterOptions {
    /// Filter for a run. `--infer` without an explicit threshold only looks
    /// at ops slower than 100ms.
    pub fn new(osd: Option<u32>, threshold: Option<u64>, infer: bool) -> Self {
        let min_lat = match threshold {
            Some(t) => t,
            None if infer => DEFAULT_INFER_THRESHOLD_US,
            None => 0,
        };
        FilterOptions { osd, min_lat }
    }

    pub fn is_osd_filter_active(&self) -> bool {
        self.osd.is_some()
    }

    pub fn is_latency_filter_active(&self) -> bool {
        self.min_lat > 0
    }

    /// The threshold always applies to the final latency, whichever field is
    /// being reported.
    pub fn matches(&self, op: &OsdOp) -> bool {
        if let Some(osd) = self.osd {
            if op.osd != osd {
                return false;
            }
        }
        op.lat >= self.min_lat
    }
}

pub fn filter_data(data: Vec<OsdOp>, filter: &FilterOptions) -> Vec<OsdOp> {
    if !filter.is_osd_filter_active() && !filter.is_latency_filter_active() {
        return data;
    }
    data.into_iter().filter(|op| filter.matches(op)).collect()
}
